//! Album likes, one per (user, album)

use crate::error::map_linked_insert_error;
use openmusic_core::{error::Result, types::*};
use sqlx::SqlitePool;

pub async fn exists(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT 1 FROM user_album_likes WHERE user_id = ? AND album_id = ?",
    )
    .bind(user_id)
    .bind(album_id)
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// Record a like; a repeated like is an invariant error
pub async fn insert(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<LikeId> {
    let id = LikeId::generate();

    let inserted =
        sqlx::query("INSERT INTO user_album_likes (id, user_id, album_id) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(user_id)
            .bind(album_id)
            .execute(pool)
            .await;

    if let Err(err) = inserted {
        let parents = [
            ("albums", "Album", album_id.as_str()),
            ("users", "User", user_id.as_str()),
        ];
        return Err(map_linked_insert_error(pool, err, "album already liked", &parents).await);
    }

    Ok(id)
}

pub async fn delete(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_album_likes WHERE user_id = ? AND album_id = ?")
        .bind(user_id)
        .bind(album_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool, album_id: &AlbumId) -> Result<u64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_album_likes WHERE album_id = ?")
            .bind(album_id)
            .fetch_one(pool)
            .await?;

    Ok(u64::try_from(count).unwrap_or_default())
}
