//! Issued refresh tokens
//!
//! A refresh token is only honoured while its row exists; logout deletes it.

use openmusic_core::{error::Result, types::UserId, MusicError};
use sqlx::SqlitePool;

pub async fn insert(pool: &SqlitePool, token: &str, user_id: &UserId) -> Result<()> {
    sqlx::query("INSERT INTO authentications (token, user_id) VALUES (?, ?)")
        .bind(token)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// # Errors
///
/// Returns `MusicError::Invariant` if the token was never issued or has been
/// revoked
pub async fn verify(pool: &SqlitePool, token: &str) -> Result<()> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM authentications WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(MusicError::invariant("refresh token is not valid")),
    }
}

pub async fn delete(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM authentications WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
