/// Collaboration (shared access) domain types
use crate::types::{CollaborationId, PlaylistId, UserId};
use serde::{Deserialize, Serialize};

/// Grant of read/write access on a playlist to a user who is not its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub id: CollaborationId,
    pub playlist_id: PlaylistId,
    pub user_id: UserId,
}

/// Target of a grant or revoke request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCollaboration {
    pub playlist_id: PlaylistId,
    pub user_id: UserId,
}
