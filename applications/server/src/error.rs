/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use openmusic_core::MusicError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error(transparent)]
    Domain(#[from] MusicError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<openmusic_storage::StorageError> for ServerError {
    fn from(err: openmusic_storage::StorageError) -> Self {
        ServerError::Domain(err.into())
    }
}

impl ServerError {
    /// Status code for this error; 5xx means the detail stays in the logs
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Auth(_) | ServerError::Jwt(_) => StatusCode::UNAUTHORIZED,
            ServerError::Domain(err) => match err {
                MusicError::NotFound { .. } => StatusCode::NOT_FOUND,
                MusicError::Authorization(_) => StatusCode::FORBIDDEN,
                MusicError::Invariant(_) | MusicError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
                MusicError::Authentication(_) => StatusCode::UNAUTHORIZED,
                MusicError::ActivityNotRecorded { .. }
                | MusicError::Storage(_)
                | MusicError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Config(_) | ServerError::Internal(_) | ServerError::Bcrypt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            json!({
                "status": "error",
                "message": "Sorry, the server failed to process the request",
            })
        } else {
            let message = match &self {
                ServerError::Jwt(_) => "Invalid token".to_string(),
                ServerError::Domain(err) => err.to_string(),
                other => other.to_string(),
            };
            json!({
                "status": "fail",
                "message": message,
            })
        };

        (status, Json(body)).into_response()
    }
}
