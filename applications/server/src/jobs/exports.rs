/// Background playlist export queue
///
/// Requests are handed to a single worker over a channel. The worker renders
/// the playlist with its songs and writes one JSON document per request into
/// the outbox directory, where mail delivery picks it up.
use async_trait::async_trait;
use chrono::Utc;
use openmusic_core::{
    storage::{ExportQueue, PlaylistStore},
    ExportRequest, MembershipManager, MusicError, SongSummary,
};
use openmusic_storage::SqliteStorage;
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use tokio::{sync::mpsc, task::JoinHandle};

/// Sending half, shared with request handlers
#[derive(Clone)]
pub struct ExportJobQueue {
    sender: mpsc::UnboundedSender<ExportRequest>,
}

impl ExportJobQueue {
    /// Queue handle plus the receiver to give to [`ExportWorker::spawn`]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ExportRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ExportQueue for ExportJobQueue {
    async fn enqueue_export(&self, request: ExportRequest) -> openmusic_core::Result<()> {
        tracing::info!(playlist_id = %request.playlist_id, "Enqueued export job");
        self.sender
            .send(request)
            .map_err(|_| MusicError::storage("export worker is not running"))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument {
    target_email: String,
    playlist: ExportedPlaylist,
}

#[derive(Debug, Serialize)]
struct ExportedPlaylist {
    id: String,
    name: String,
    songs: Vec<SongSummary>,
}

pub struct ExportWorker {
    storage: Arc<SqliteStorage>,
    memberships: MembershipManager,
    outbox: PathBuf,
}

impl ExportWorker {
    pub fn new(
        storage: Arc<SqliteStorage>,
        memberships: MembershipManager,
        outbox: PathBuf,
    ) -> Self {
        Self {
            storage,
            memberships,
            outbox,
        }
    }

    /// Start the worker task; it stops once every queue handle is dropped
    pub fn spawn(self, mut receiver: mpsc::UnboundedReceiver<ExportRequest>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!("Export worker started, outbox {}", self.outbox.display());

            while let Some(request) = receiver.recv().await {
                match self.process(&request).await {
                    Ok(path) => tracing::info!(
                        playlist_id = %request.playlist_id,
                        "Export written to {}",
                        path.display()
                    ),
                    Err(e) => tracing::error!(
                        playlist_id = %request.playlist_id,
                        "Export failed: {}",
                        e
                    ),
                }
            }

            tracing::info!("Export worker stopped");
        })
    }

    async fn process(&self, request: &ExportRequest) -> anyhow::Result<PathBuf> {
        // The playlist may have been deleted since the request was accepted
        let playlist = self
            .storage
            .get_playlist(&request.playlist_id)
            .await?
            .ok_or_else(|| MusicError::not_found("Playlist", request.playlist_id.as_str()))?;
        let songs = self.memberships.list_songs(&request.playlist_id).await?;

        let document = ExportDocument {
            target_email: request.target_email.clone(),
            playlist: ExportedPlaylist {
                id: playlist.id.to_string(),
                name: playlist.name,
                songs,
            },
        };

        tokio::fs::create_dir_all(&self.outbox).await?;
        let path = self.outbox.join(format!(
            "{}-{}.json",
            request.playlist_id,
            Utc::now().format("%Y%m%dT%H%M%S%.6f")
        ));
        tokio::fs::write(&path, serde_json::to_vec_pretty(&document)?).await?;

        Ok(path)
    }
}
