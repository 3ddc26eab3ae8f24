use openmusic_core::{error::Result, types::*, MusicError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn song_from_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        year: row.get("year"),
        performer: row.get("performer"),
        genre: row.get("genre"),
        duration: row.get("duration"),
        album_id: row.get("album_id"),
    }
}

fn summary_from_row(row: &SqliteRow) -> SongSummary {
    SongSummary {
        id: row.get("id"),
        title: row.get("title"),
        performer: row.get("performer"),
    }
}

/// Add a song to the catalog
///
/// # Errors
///
/// Returns `MusicError::NotFound` if `album_id` names a missing album
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<SongId> {
    let id = SongId::generate();

    sqlx::query(
        r#"
        INSERT INTO songs (id, title, year, performer, genre, duration, album_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.performer)
    .bind(&song.genre)
    .bind(song.duration)
    .bind(&song.album_id)
    .execute(pool)
    .await
    .map_err(|err| {
        let album = song.album_id.as_ref().map_or("", AlbumId::as_str);
        crate::error::map_insert_error(err, "song could not be added", ("Album", album))
    })?;

    Ok(id)
}

/// List songs, optionally filtered by case-insensitive title and performer
/// substrings
pub async fn search(pool: &SqlitePool, query: &SongQuery) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, performer
        FROM songs
        WHERE (?1 IS NULL OR instr(lower(title), lower(?1)) > 0)
          AND (?2 IS NULL OR instr(lower(performer), lower(?2)) > 0)
        ORDER BY rowid
        "#,
    )
    .bind(query.title.as_deref())
    .bind(query.performer.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(summary_from_row).collect())
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, year, performer, genre, duration, album_id FROM songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(song_from_row))
}

pub async fn get_summary(pool: &SqlitePool, id: &SongId) -> Result<Option<SongSummary>> {
    let row = sqlx::query("SELECT id, title, performer FROM songs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(summary_from_row))
}

/// Get songs on an album
pub async fn get_by_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<SongSummary>> {
    let rows =
        sqlx::query("SELECT id, title, performer FROM songs WHERE album_id = ? ORDER BY rowid")
            .bind(album_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.iter().map(summary_from_row).collect())
}

pub async fn exists(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM songs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Replace every field of a song
pub async fn update(pool: &SqlitePool, id: &SongId, song: CreateSong) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = ?, year = ?, performer = ?, genre = ?, duration = ?, album_id = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.performer)
    .bind(&song.genre)
    .bind(song.duration)
    .bind(&song.album_id)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|err| {
        let album = song.album_id.as_ref().map_or("", AlbumId::as_str);
        crate::error::map_insert_error(err, "song could not be updated", ("Album", album))
    })?;

    if result.rows_affected() == 0 {
        return Err(MusicError::not_found("Song", id.as_str()));
    }

    Ok(())
}

/// Delete a song; playlist memberships and activities that reference it
/// cascade
pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MusicError::not_found("Song", id.as_str()));
    }

    Ok(())
}
