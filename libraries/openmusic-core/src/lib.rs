//! OpenMusic Core
//!
//! Storage-agnostic domain types, errors, repository traits and the playlist
//! collaboration components for the OpenMusic backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `PlaylistSummary`, `Collaboration`, `ActivityEvent`, `Song`, `User`, ...
//! - **Repository Traits**: `PlaylistStore`, `CollaborationStore`, `MembershipStore`,
//!   `ActivityLog`, plus the `IdentityPort`, `CatalogPort` and `ExportQueue` ports
//! - **Components**: `AccessGuard`, `MembershipManager`, `CollaborationManager`,
//!   `ActivityRecorder`, `PlaylistExporter`
//! - **Validation**: one `Validate` payload type per operation
//! - **Error Handling**: unified `MusicError` and `Result` types
//!
//! # Example
//!
//! ```rust,no_run
//! use openmusic_core::playlists::AccessGuard;
//! use openmusic_core::storage::PlaylistStore;
//! use openmusic_core::types::{PlaylistId, UserId};
//! use std::sync::Arc;
//!
//! # async fn example(store: Arc<dyn PlaylistStore>) -> openmusic_core::Result<()> {
//! let guard = AccessGuard::new(store);
//! guard
//!     .verify_access(&PlaylistId::new("playlist-1"), &UserId::new("user-2"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod playlists;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{MusicError, Result};
pub use playlists::{
    AccessGuard, ActivityRecorder, CollaborationManager, MembershipManager, PlaylistExporter,
};
pub use storage::{
    ActivityLog, CatalogPort, CollaborationStore, ExportQueue, IdentityPort, MembershipStore,
    PlaylistStore,
};
pub use types::{
    ActivityAction, ActivityEntry, ActivityEvent, Album, AlbumId, AlbumWithSongs, Collaboration,
    CollaborationId, CreateAlbum, CreateCollaboration, CreatePlaylist, CreateSong, CreateUser,
    Credentials, ExportRequest, LikeId, MembershipId, PlaylistAccess, PlaylistId, PlaylistSummary,
    PlaylistWithSongs, Song, SongId, SongQuery, SongSummary, User, UserId,
};
pub use validation::{validate, Validate};
