//! Playlist membership: which catalog songs a playlist holds

use crate::error::map_linked_insert_error;
use openmusic_core::{error::Result, types::*};
use sqlx::SqlitePool;

pub async fn exists(pool: &SqlitePool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT 1 FROM playlist_songs WHERE playlist_id = ? AND song_id = ?",
    )
    .bind(playlist_id)
    .bind(song_id)
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// Link a song to a playlist
pub async fn insert(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<MembershipId> {
    let id = MembershipId::generate();

    let inserted =
        sqlx::query("INSERT INTO playlist_songs (id, playlist_id, song_id) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(playlist_id)
            .bind(song_id)
            .execute(pool)
            .await;

    if let Err(err) = inserted {
        let parents = [
            ("playlists", "Playlist", playlist_id.as_str()),
            ("songs", "Song", song_id.as_str()),
        ];
        return Err(map_linked_insert_error(pool, err, "song already in playlist", &parents).await);
    }

    Ok(id)
}

pub async fn delete(pool: &SqlitePool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Song ids in insertion order
pub async fn song_ids(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<SongId>> {
    let ids = sqlx::query_scalar::<_, SongId>(
        "SELECT song_id FROM playlist_songs WHERE playlist_id = ? ORDER BY rowid",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
