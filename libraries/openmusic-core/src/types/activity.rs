/// Playlist activity (audit trail) domain types
use crate::types::{ActivityId, PlaylistId, SongId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of membership change an activity event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// Song was added to the playlist
    Add,
    /// Song was removed from the playlist
    Delete,
}

impl ActivityAction {
    /// Convert action to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ActivityAction::Add),
            "delete" => Ok(ActivityAction::Delete),
            other => Err(format!("unknown activity action: {other}")),
        }
    }
}

/// One appended membership-change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: ActivityId,
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
    pub user_id: UserId,
    pub action: ActivityAction,
    /// Server-assigned
    pub time: DateTime<Utc>,
}

/// Activity event resolved for display: acting user's name and song title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    pub time: DateTime<Utc>,
}
