use openmusic_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Create a playlist owned by `playlist.owner`
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<PlaylistId> {
    let id = PlaylistId::generate();

    sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&playlist.name)
        .bind(&playlist.owner)
        .execute(pool)
        .await
        .map_err(|err| {
            crate::error::map_insert_error(
                err,
                "playlist could not be created",
                ("User", playlist.owner.as_str()),
            )
        })?;

    Ok(id)
}

/// Get user's playlists (owned + shared with them)
pub async fn get_user_playlists(
    pool: &SqlitePool,
    user_id: &UserId,
) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.owner = ? OR c.user_id = ?
        ORDER BY p.rowid
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: row.get("id"),
            name: row.get("name"),
            username: row.get("username"),
        })
        .collect())
}

/// Get playlist by ID with its owner's username
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<PlaylistSummary>> {
    let row = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        WHERE p.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| PlaylistSummary {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
    }))
}

pub async fn get_owner(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<UserId>> {
    let owner = sqlx::query_scalar::<_, UserId>("SELECT owner FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(owner)
}

/// Owner and collaborators in one statement.
///
/// The left join yields one row per collaborator, or a single row with a
/// NULL collaborator when there are none.
pub async fn get_access(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<PlaylistAccess>> {
    let rows = sqlx::query(
        r#"
        SELECT p.owner, c.user_id AS collaborator
        FROM playlists p
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.id = ?
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let mut access = PlaylistAccess::owned_by(first.get("owner"));
    access.collaborators = rows
        .iter()
        .filter_map(|row| row.get::<Option<UserId>, _>("collaborator"))
        .collect();

    Ok(Some(access))
}

/// Delete a playlist; collaborations, memberships and activities cascade
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
