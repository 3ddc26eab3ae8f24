use crate::songs;
use openmusic_core::{error::Result, types::*, MusicError};
use sqlx::{Row, SqlitePool};

/// Create new album
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<AlbumId> {
    let id = AlbumId::generate();

    sqlx::query("INSERT INTO albums (id, name, year) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&album.name)
        .bind(album.year)
        .execute(pool)
        .await?;

    Ok(id)
}

/// Get album by ID
pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, year FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Album {
        id: row.get("id"),
        name: row.get("name"),
        year: row.get("year"),
    }))
}

pub async fn exists(pool: &SqlitePool, id: &AlbumId) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Get album with the songs that reference it
pub async fn get_with_songs(pool: &SqlitePool, id: &AlbumId) -> Result<Option<AlbumWithSongs>> {
    let Some(album) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let songs = songs::get_by_album(pool, id).await?;

    Ok(Some(AlbumWithSongs {
        id: album.id,
        name: album.name,
        year: album.year,
        songs,
    }))
}

/// Replace an album's name and year
pub async fn update(pool: &SqlitePool, id: &AlbumId, album: CreateAlbum) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE albums
        SET name = ?, year = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&album.name)
    .bind(album.year)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(MusicError::not_found("Album", id.as_str()));
    }

    Ok(())
}

/// Delete an album; its songs cascade
pub async fn delete(pool: &SqlitePool, id: &AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MusicError::not_found("Album", id.as_str()));
    }

    Ok(())
}
