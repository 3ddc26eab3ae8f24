//! OpenMusic Storage
//!
//! `SQLite` persistence for the OpenMusic backend.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each table family owns its own queries in a module
//! - **One Context**: [`SqliteStorage`] implements every store and port trait
//!   of `openmusic-core` by delegating to the slices
//! - **Constraints in the Schema**: uniqueness and cascades are enforced by
//!   the database; violations are mapped to domain errors
//!
//! # Example
//!
//! ```rust,no_run
//! use openmusic_storage::{create_pool, run_migrations, SqliteStorage};
//! use openmusic_core::storage::PlaylistStore;
//! use openmusic_core::types::UserId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://openmusic.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = SqliteStorage::new(pool);
//! let playlists = storage.playlists_for_user(&UserId::new("user-1")).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod activities;
pub mod album_likes;
pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod playlist_songs;
pub mod playlists;
pub mod songs;
pub mod users;

pub use context::SqliteStorage;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// Foreign keys are switched on for every connection; playlist deletion
/// relies on them to cascade.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://openmusic.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "creating sqlite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!("sqlite pool ready");

    Ok(pool)
}
