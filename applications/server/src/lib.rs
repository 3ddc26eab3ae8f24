//! OpenMusic Server Library
//!
//! HTTP boundary of the OpenMusic backend: configuration, JWT authentication,
//! the axum handlers over `openmusic-core` and `openmusic-storage`, and the
//! background export worker.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AlbumLikes, AuthService};
pub use state::AppState;
