/// Collaboration API routes
use crate::{
    api::{created, message, JsonBody},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use openmusic_core::{validate, validation::CollaborationPayload};
use serde_json::{json, Value};

/// POST /collaborations
/// Owner grants a user access to a playlist
pub async fn add_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let target = validate::<CollaborationPayload>(body)?;

    let collaboration = app_state
        .collaborations
        .add_collaboration(&target.playlist_id, &target.user_id, auth.user_id())
        .await?;

    Ok(created(json!({ "collaborationId": collaboration.id })))
}

/// DELETE /collaborations
/// Owner revokes a grant; revoking a missing grant still succeeds
pub async fn delete_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>> {
    let target = validate::<CollaborationPayload>(body)?;

    app_state
        .collaborations
        .delete_collaboration(&target.playlist_id, &target.user_id, auth.user_id())
        .await?;

    Ok(message("Collaboration deleted"))
}
