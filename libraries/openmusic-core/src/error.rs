/// Core error types for OpenMusic
use thiserror::Error;

/// Result type alias using `MusicError`
pub type Result<T> = std::result::Result<T, MusicError>;

/// Core error type for OpenMusic
///
/// The first three variants are the domain kinds every playlist operation can
/// fail with. They are propagated unchanged up to the HTTP boundary, which is
/// the only place that turns them into status codes.
#[derive(Error, Debug)]
pub enum MusicError {
    /// Referenced playlist, user, song or album does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Caller is neither owner nor (where applicable) collaborator
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Operation would violate a uniqueness or precondition rule
    #[error("{0}")]
    Invariant(String),

    /// Payload is malformed (missing field, wrong type, unknown field)
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Credentials did not match
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A membership change succeeded but its activity event was not appended
    #[error("Activity for song {song_id} in playlist {playlist_id} was not recorded: {reason}")]
    ActivityNotRecorded {
        playlist_id: String,
        song_id: String,
        reason: String,
    },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl MusicError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an authorization error
    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create an invalid payload error
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for `Authorization`
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    /// True for `Invariant`
    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MusicError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for MusicError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = MusicError::not_found("Playlist", "playlist-1");
        assert_eq!(err.to_string(), "Playlist not found: playlist-1");
        assert!(err.is_not_found());
    }

    #[test]
    fn invariant_message_is_verbatim() {
        let err = MusicError::invariant("song already in playlist");
        assert_eq!(err.to_string(), "song already in playlist");
        assert!(err.is_invariant());
        assert!(!err.is_authorization());
    }
}
