/// Song (catalog) domain types
use crate::types::{AlbumId, SongId};
use serde::{Deserialize, Serialize};

/// Song in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: Option<i32>,
    pub album_id: Option<AlbumId>,
}

/// Short form of a song used in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}

/// Data for creating or replacing a song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSong {
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: Option<i32>,
    pub album_id: Option<AlbumId>,
}

/// Optional case-insensitive substring filters for song listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SongQuery {
    pub title: Option<String>,
    pub performer: Option<String>,
}
