/// Playlist export API routes
use crate::{
    api::{message, JsonBody},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use openmusic_core::{validate, validation::ExportPayload, PlaylistId};
use serde_json::Value;

/// POST /export/playlists/:id
///
/// Owner only. The export is produced in the background; a 201 means it was
/// queued.
pub async fn export_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let target_email = validate::<ExportPayload>(body)?;

    app_state
        .exports
        .request_export(&PlaylistId::new(id), target_email, auth.user_id())
        .await?;

    Ok((StatusCode::CREATED, message("Your export request is being processed")))
}
