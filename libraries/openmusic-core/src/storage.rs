//! Repository and port traits consumed by the playlist components
//!
//! Each component receives only the stores it needs as `Arc<dyn Trait>`;
//! there is no ambient connection object. The SQLite implementation lives in
//! `openmusic-storage`.

use crate::error::Result;
use crate::types::{
    ActivityAction, ActivityEvent, Collaboration, CreatePlaylist, ExportRequest, MembershipId,
    PlaylistAccess, PlaylistId, PlaylistSummary, SongId, SongSummary, UserId,
};
use async_trait::async_trait;

/// Owns playlist records and their lifecycle
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Insert a playlist and return its new id
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<PlaylistId>;

    /// Playlists owned by or shared with `user_id`, each listed once
    async fn playlists_for_user(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>>;

    /// Playlist with its owner's username
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<PlaylistSummary>>;

    /// Owner of the playlist, `None` if it does not exist
    async fn playlist_owner(&self, id: &PlaylistId) -> Result<Option<UserId>>;

    /// Owner plus every collaborator, read together.
    ///
    /// Returns `None` only when the playlist does not exist; a playlist
    /// without collaborators yields an empty `collaborators` list.
    async fn playlist_access(&self, id: &PlaylistId) -> Result<Option<PlaylistAccess>>;

    /// Delete the playlist and, by cascade, its collaborations, memberships
    /// and activity events. Returns whether a row was deleted.
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<bool>;
}

/// Owns shared-access grants, unique per (playlist, user)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollaborationStore: Send + Sync {
    async fn collaboration_exists(&self, playlist_id: &PlaylistId, user_id: &UserId)
        -> Result<bool>;

    /// Insert a grant. A duplicate must fail with `MusicError::Invariant`,
    /// including when it is only detected by the storage constraint.
    async fn insert_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<Collaboration>;

    /// Returns whether a grant was deleted
    async fn delete_collaboration(&self, playlist_id: &PlaylistId, user_id: &UserId)
        -> Result<bool>;
}

/// Owns the playlist-song relation, unique per (playlist, song)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn membership_exists(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool>;

    /// Insert a membership. A duplicate must fail with `MusicError::Invariant`,
    /// including when it is only detected by the storage constraint.
    async fn insert_membership(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<MembershipId>;

    /// Returns whether a membership was deleted
    async fn delete_membership(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool>;

    /// Song ids linked to the playlist, in stored order
    async fn playlist_song_ids(&self, playlist_id: &PlaylistId) -> Result<Vec<SongId>>;
}

/// Append-only store of membership-change events
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Append one event; the store assigns id and time
    async fn append_activity(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<ActivityEvent>;

    /// Every event of the playlist, ascending by time then insertion
    async fn activities_for(&self, playlist_id: &PlaylistId) -> Result<Vec<ActivityEvent>>;
}

/// Identity port, implemented by user account storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityPort: Send + Sync {
    async fn user_exists(&self, user_id: &UserId) -> Result<bool>;

    async fn user_display_name(&self, user_id: &UserId) -> Result<Option<String>>;
}

/// Catalog port, implemented by song storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool>;

    async fn song_summary(&self, song_id: &SongId) -> Result<Option<SongSummary>>;
}

/// Hand-off point for playlist exports; delivery happens outside the request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExportQueue: Send + Sync {
    /// Accept the request for later processing. Returning `Ok` does not mean
    /// the export was delivered.
    async fn enqueue_export(&self, request: ExportRequest) -> Result<()>;
}
