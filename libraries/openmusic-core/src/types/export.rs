/// Playlist export domain types
use crate::types::PlaylistId;
use serde::{Deserialize, Serialize};

/// A queued request to send a playlist's contents to an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub playlist_id: PlaylistId,
    pub target_email: String,
}
