//! Owner-requested playlist exports

use crate::error::Result;
use crate::playlists::AccessGuard;
use crate::storage::ExportQueue;
use crate::types::{ExportRequest, PlaylistId, UserId};
use std::sync::Arc;

/// Queues exports of a playlist; only the owner may request one
#[derive(Clone)]
pub struct PlaylistExporter {
    guard: AccessGuard,
    queue: Arc<dyn ExportQueue>,
}

impl PlaylistExporter {
    pub fn new(guard: AccessGuard, queue: Arc<dyn ExportQueue>) -> Self {
        Self { guard, queue }
    }

    pub async fn request_export(
        &self,
        playlist_id: &PlaylistId,
        target_email: String,
        acting_user_id: &UserId,
    ) -> Result<()> {
        self.guard.verify_owner(playlist_id, acting_user_id).await?;

        self.queue
            .enqueue_export(ExportRequest {
                playlist_id: playlist_id.clone(),
                target_email,
            })
            .await?;
        tracing::info!(%playlist_id, user_id = %acting_user_id, "export queued");

        Ok(())
    }
}
