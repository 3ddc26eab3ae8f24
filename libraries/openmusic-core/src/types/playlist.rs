/// Playlist domain types
use crate::types::{PlaylistId, SongSummary, UserId};
use serde::{Deserialize, Serialize};

/// Playlist as listed to clients, with the owner's username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
}

/// Playlist summary together with its current songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistWithSongs {
    #[serde(flatten)]
    pub playlist: PlaylistSummary,
    pub songs: Vec<SongSummary>,
}

/// Data for creating a playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlaylist {
    pub name: String,
    pub owner: UserId,
}

/// Owner and collaborators of one playlist, loaded in a single read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistAccess {
    pub owner: UserId,
    pub collaborators: Vec<UserId>,
}

impl PlaylistAccess {
    /// Playlist with no collaborators
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner,
            collaborators: Vec::new(),
        }
    }

    /// Whether `user_id` is the owner
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner == user_id
    }

    /// Whether `user_id` is in `{owner} ∪ collaborators`
    pub fn permits(&self, user_id: &UserId) -> bool {
        self.is_owner(user_id) || self.collaborators.contains(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_without_collaborators_is_permitted() {
        let access = PlaylistAccess::owned_by(UserId::new("user-1"));

        assert!(access.permits(&UserId::new("user-1")));
        assert!(!access.permits(&UserId::new("user-2")));
    }

    #[test]
    fn collaborator_is_permitted_but_not_owner() {
        let access = PlaylistAccess {
            owner: UserId::new("user-1"),
            collaborators: vec![UserId::new("user-2")],
        };

        assert!(access.permits(&UserId::new("user-2")));
        assert!(!access.is_owner(&UserId::new("user-2")));
        assert!(!access.permits(&UserId::new("user-3")));
    }

    #[test]
    fn playlist_with_songs_flattens_summary() {
        let playlist = PlaylistWithSongs {
            playlist: PlaylistSummary {
                id: PlaylistId::new("playlist-1"),
                name: "Road trip".to_string(),
                username: "alice".to_string(),
            },
            songs: vec![],
        };

        let json = serde_json::to_value(&playlist).unwrap();
        assert_eq!(json["id"], "playlist-1");
        assert_eq!(json["username"], "alice");
        assert!(json["songs"].as_array().unwrap().is_empty());
    }
}
