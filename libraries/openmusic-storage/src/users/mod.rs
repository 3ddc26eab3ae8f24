//! User accounts and credential lookups
//!
//! Passwords arrive here already hashed; this module never sees plain text.

use crate::error::map_insert_error;
use openmusic_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Insert a user with an already-hashed password
///
/// # Errors
///
/// Returns `MusicError::Invariant` if the username is taken
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    fullname: &str,
) -> Result<UserId> {
    let id = UserId::generate();

    sqlx::query("INSERT INTO users (id, username, password, fullname) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(fullname)
        .execute(pool)
        .await
        .map_err(|err| map_insert_error(err, "username is already taken", ("User", username)))?;

    Ok(id)
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, fullname FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| User {
        id: row.get("id"),
        username: row.get("username"),
        fullname: row.get("fullname"),
    }))
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, fullname FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            fullname: row.get("fullname"),
        })
        .collect())
}

/// Get user id and password hash for a username
pub async fn get_credentials(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<(UserId, String)>> {
    let row = sqlx::query("SELECT id, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| (row.get("id"), row.get("password"))))
}

pub async fn exists(pool: &SqlitePool, id: &UserId) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Name shown next to a user's activity
pub async fn get_username(pool: &SqlitePool, id: &UserId) -> Result<Option<String>> {
    let username = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(username)
}
