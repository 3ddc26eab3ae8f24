use crate::{
    activities, album_likes, albums, authentications, collaborations, playlist_songs, playlists,
    songs, users,
};
use async_trait::async_trait;
use openmusic_core::{
    error::Result,
    storage::{
        ActivityLog, CatalogPort, CollaborationStore, IdentityPort, MembershipStore, PlaylistStore,
    },
    types::*,
};
use sqlx::SqlitePool;

/// `SQLite`-backed implementation of every store and port
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // Users
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        fullname: &str,
    ) -> Result<UserId> {
        users::create(&self.pool, username, password_hash, fullname).await
    }

    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    pub async fn get_credentials(&self, username: &str) -> Result<Option<(UserId, String)>> {
        users::get_credentials(&self.pool, username).await
    }

    // Refresh tokens
    pub async fn add_refresh_token(&self, token: &str, user_id: &UserId) -> Result<()> {
        authentications::insert(&self.pool, token, user_id).await
    }

    pub async fn verify_refresh_token(&self, token: &str) -> Result<()> {
        authentications::verify(&self.pool, token).await
    }

    pub async fn delete_refresh_token(&self, token: &str) -> Result<bool> {
        authentications::delete(&self.pool, token).await
    }

    // Albums
    pub async fn create_album(&self, album: CreateAlbum) -> Result<AlbumId> {
        albums::create(&self.pool, album).await
    }

    pub async fn get_album(&self, id: &AlbumId) -> Result<Option<AlbumWithSongs>> {
        albums::get_with_songs(&self.pool, id).await
    }

    pub async fn update_album(&self, id: &AlbumId, album: CreateAlbum) -> Result<()> {
        albums::update(&self.pool, id, album).await
    }

    pub async fn delete_album(&self, id: &AlbumId) -> Result<()> {
        albums::delete(&self.pool, id).await
    }

    pub async fn album_exists(&self, id: &AlbumId) -> Result<bool> {
        albums::exists(&self.pool, id).await
    }

    // Album likes
    pub async fn album_liked(&self, user_id: &UserId, album_id: &AlbumId) -> Result<bool> {
        album_likes::exists(&self.pool, user_id, album_id).await
    }

    pub async fn like_album(&self, user_id: &UserId, album_id: &AlbumId) -> Result<LikeId> {
        album_likes::insert(&self.pool, user_id, album_id).await
    }

    pub async fn unlike_album(&self, user_id: &UserId, album_id: &AlbumId) -> Result<bool> {
        album_likes::delete(&self.pool, user_id, album_id).await
    }

    pub async fn album_like_count(&self, album_id: &AlbumId) -> Result<u64> {
        album_likes::count(&self.pool, album_id).await
    }

    // Songs
    pub async fn create_song(&self, song: CreateSong) -> Result<SongId> {
        songs::create(&self.pool, song).await
    }

    pub async fn search_songs(&self, query: &SongQuery) -> Result<Vec<SongSummary>> {
        songs::search(&self.pool, query).await
    }

    pub async fn get_song(&self, id: &SongId) -> Result<Option<Song>> {
        songs::get_by_id(&self.pool, id).await
    }

    pub async fn update_song(&self, id: &SongId, song: CreateSong) -> Result<()> {
        songs::update(&self.pool, id, song).await
    }

    pub async fn delete_song(&self, id: &SongId) -> Result<()> {
        songs::delete(&self.pool, id).await
    }
}

#[async_trait]
impl PlaylistStore for SqliteStorage {
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<PlaylistId> {
        playlists::create(&self.pool, playlist).await
    }

    async fn playlists_for_user(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
        playlists::get_user_playlists(&self.pool, user_id).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<PlaylistSummary>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn playlist_owner(&self, id: &PlaylistId) -> Result<Option<UserId>> {
        playlists::get_owner(&self.pool, id).await
    }

    async fn playlist_access(&self, id: &PlaylistId) -> Result<Option<PlaylistAccess>> {
        playlists::get_access(&self.pool, id).await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<bool> {
        playlists::delete(&self.pool, id).await
    }
}

#[async_trait]
impl CollaborationStore for SqliteStorage {
    async fn collaboration_exists(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool> {
        collaborations::exists(&self.pool, playlist_id, user_id).await
    }

    async fn insert_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<Collaboration> {
        collaborations::insert(&self.pool, playlist_id, user_id).await
    }

    async fn delete_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool> {
        collaborations::delete(&self.pool, playlist_id, user_id).await
    }
}

#[async_trait]
impl MembershipStore for SqliteStorage {
    async fn membership_exists(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool> {
        playlist_songs::exists(&self.pool, playlist_id, song_id).await
    }

    async fn insert_membership(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<MembershipId> {
        playlist_songs::insert(&self.pool, playlist_id, song_id).await
    }

    async fn delete_membership(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool> {
        playlist_songs::delete(&self.pool, playlist_id, song_id).await
    }

    async fn playlist_song_ids(&self, playlist_id: &PlaylistId) -> Result<Vec<SongId>> {
        playlist_songs::song_ids(&self.pool, playlist_id).await
    }
}

#[async_trait]
impl ActivityLog for SqliteStorage {
    async fn append_activity(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<ActivityEvent> {
        activities::append(&self.pool, playlist_id, song_id, user_id, action).await
    }

    async fn activities_for(&self, playlist_id: &PlaylistId) -> Result<Vec<ActivityEvent>> {
        activities::get_for_playlist(&self.pool, playlist_id).await
    }
}

#[async_trait]
impl IdentityPort for SqliteStorage {
    async fn user_exists(&self, user_id: &UserId) -> Result<bool> {
        users::exists(&self.pool, user_id).await
    }

    async fn user_display_name(&self, user_id: &UserId) -> Result<Option<String>> {
        users::get_username(&self.pool, user_id).await
    }
}

#[async_trait]
impl CatalogPort for SqliteStorage {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool> {
        songs::exists(&self.pool, song_id).await
    }

    async fn song_summary(&self, song_id: &SongId) -> Result<Option<SongSummary>> {
        songs::get_summary(&self.pool, song_id).await
    }
}
