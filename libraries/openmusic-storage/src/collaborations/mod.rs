//! Shared-access grants, one per (playlist, user)

use crate::error::map_linked_insert_error;
use openmusic_core::{error::Result, types::*};
use sqlx::SqlitePool;

pub async fn exists(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT 1 FROM collaborations WHERE playlist_id = ? AND user_id = ?",
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// Insert a grant; the unique index turns a racing duplicate into an
/// invariant error
pub async fn insert(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<Collaboration> {
    let id = CollaborationId::generate();

    let inserted =
        sqlx::query("INSERT INTO collaborations (id, playlist_id, user_id) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(playlist_id)
            .bind(user_id)
            .execute(pool)
            .await;

    if let Err(err) = inserted {
        let parents = [
            ("playlists", "Playlist", playlist_id.as_str()),
            ("users", "User", user_id.as_str()),
        ];
        return Err(map_linked_insert_error(
            pool,
            err,
            "user is already a collaborator on this playlist",
            &parents,
        )
        .await);
    }

    Ok(Collaboration {
        id,
        playlist_id: playlist_id.clone(),
        user_id: user_id.clone(),
    })
}

pub async fn delete(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
