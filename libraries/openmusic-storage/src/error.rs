/// Storage-specific errors
use openmusic_core::MusicError;
use sqlx::SqlitePool;
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored value could not be decoded into its domain type
    #[error("Corrupt row in {table}: {reason}")]
    CorruptRow { table: &'static str, reason: String },

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    pub fn corrupt_row(table: &'static str, reason: impl Into<String>) -> Self {
        Self::CorruptRow {
            table,
            reason: reason.into(),
        }
    }
}

impl From<StorageError> for MusicError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(err) => MusicError::from(err),
            other => MusicError::storage(other.to_string()),
        }
    }
}

enum Violation {
    Unique,
    ForeignKey,
}

fn violation(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if db_err.is_unique_violation() {
        Some(Violation::Unique)
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey)
    } else {
        None
    }
}

/// Map the error of an insert guarded by a unique constraint.
///
/// A unique violation becomes `MusicError::Invariant` with `duplicate`, a
/// foreign key violation becomes `MusicError::NotFound` for `parent`, and
/// anything else passes through as a database error.
pub(crate) fn map_insert_error(
    err: sqlx::Error,
    duplicate: &str,
    parent: (&str, &str),
) -> MusicError {
    match violation(&err) {
        Some(Violation::Unique) => MusicError::invariant(duplicate),
        Some(Violation::ForeignKey) => MusicError::not_found(parent.0, parent.1),
        None => MusicError::from(err),
    }
}

/// A row referenced by an insert: `(table, entity, id)`
pub(crate) type Parent<'a> = (&'static str, &'static str, &'a str);

/// Like [`map_insert_error`] for rows with several foreign keys.
///
/// SQLite does not say which reference failed, so the parents are looked up
/// again in order and the first missing one is reported.
pub(crate) async fn map_linked_insert_error(
    pool: &SqlitePool,
    err: sqlx::Error,
    duplicate: &str,
    parents: &[Parent<'_>],
) -> MusicError {
    match violation(&err) {
        Some(Violation::Unique) => MusicError::invariant(duplicate),
        Some(Violation::ForeignKey) => missing_parent(pool, parents).await,
        None => MusicError::from(err),
    }
}

async fn missing_parent(pool: &SqlitePool, parents: &[Parent<'_>]) -> MusicError {
    for &(table, entity, id) in parents {
        let sql = format!("SELECT 1 FROM {table} WHERE id = ?");
        match sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => return MusicError::not_found(entity, id),
            Err(err) => return MusicError::from(err),
        }
    }

    MusicError::invariant("a referenced record changed during the write")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_pass_through() {
        let err = map_insert_error(sqlx::Error::RowNotFound, "dup", ("Playlist", "p-1"));
        assert!(matches!(err, MusicError::Database(_)));
    }

    #[test]
    fn corrupt_row_becomes_storage_error() {
        let err: MusicError = StorageError::corrupt_row("songs", "bad year").into();
        assert!(matches!(err, MusicError::Storage(msg) if msg.contains("songs")));
    }
}
