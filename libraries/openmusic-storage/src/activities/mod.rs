//! Append-only playlist activity log
//!
//! `time` is stored as fixed-width UTC text with microsecond precision, so
//! comparing strings compares instants. On append the new time is clamped to
//! the latest time already logged for the playlist, which keeps the log
//! monotonic even if the wall clock steps backwards. Ties are broken by
//! insertion order.

use crate::error::map_linked_insert_error;
use crate::StorageError;
use chrono::{DateTime, Utc};
use openmusic_core::{error::Result, types::*, MusicError};
use sqlx::{Row, SqlitePool};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub(crate) fn format_time(time: DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub(crate) fn parse_time(raw: &str) -> std::result::Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| StorageError::corrupt_row("playlist_song_activities", e.to_string()))
}

/// Append one event stamped with the current time
pub async fn append(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
    user_id: &UserId,
    action: ActivityAction,
) -> Result<ActivityEvent> {
    let id = ActivityId::generate();
    let now = format_time(Utc::now());

    let appended = sqlx::query(
        r#"
        INSERT INTO playlist_song_activities (id, playlist_id, song_id, user_id, action, time)
        VALUES (?, ?, ?, ?, ?, MAX(?, COALESCE(
            (SELECT MAX(time) FROM playlist_song_activities WHERE playlist_id = ?), ''
        )))
        RETURNING time
        "#,
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_id)
    .bind(user_id)
    .bind(action.as_str())
    .bind(&now)
    .bind(playlist_id)
    .fetch_one(pool)
    .await;

    let row = match appended {
        Ok(row) => row,
        Err(err) => {
            let parents = [
                ("playlists", "Playlist", playlist_id.as_str()),
                ("songs", "Song", song_id.as_str()),
                ("users", "User", user_id.as_str()),
            ];
            return Err(map_linked_insert_error(
                pool,
                err,
                "activity already recorded",
                &parents,
            )
            .await);
        }
    };

    let time = parse_time(row.get::<&str, _>("time"))?;

    Ok(ActivityEvent {
        id,
        playlist_id: playlist_id.clone(),
        song_id: song_id.clone(),
        user_id: user_id.clone(),
        action,
        time,
    })
}

/// Every event of the playlist, oldest first
pub async fn get_for_playlist(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
) -> Result<Vec<ActivityEvent>> {
    let rows = sqlx::query(
        r#"
        SELECT id, playlist_id, song_id, user_id, action, time
        FROM playlist_song_activities
        WHERE playlist_id = ?
        ORDER BY time ASC, rowid ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let action = row
                .get::<&str, _>("action")
                .parse::<ActivityAction>()
                .map_err(|reason| StorageError::corrupt_row("playlist_song_activities", reason))?;
            let time = parse_time(row.get::<&str, _>("time"))?;

            Ok(ActivityEvent {
                id: row.get("id"),
                playlist_id: row.get("playlist_id"),
                song_id: row.get("song_id"),
                user_id: row.get("user_id"),
                action,
                time,
            })
        })
        .collect::<std::result::Result<Vec<_>, StorageError>>()
        .map_err(MusicError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formatted_times_sort_as_instants() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 9, 59, 59).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);

        let (a, b) = (format_time(earlier), format_time(later));
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn format_then_parse_keeps_microseconds() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
            + chrono::Duration::microseconds(123_456);

        assert_eq!(parse_time(&format_time(time)).unwrap(), time);
    }

    #[test]
    fn garbage_time_is_corrupt_row() {
        assert!(matches!(
            parse_time("yesterday"),
            Err(StorageError::CorruptRow { .. })
        ));
    }
}
