/// Album domain types
use crate::types::{AlbumId, SongSummary};
use serde::{Deserialize, Serialize};

/// Album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
}

/// Album together with the songs that reference it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumWithSongs {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
    pub songs: Vec<SongSummary>,
}

/// Data for creating or replacing an album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAlbum {
    pub name: String,
    pub year: i32,
}
