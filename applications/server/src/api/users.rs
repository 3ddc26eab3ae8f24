/// User API routes
use crate::{
    api::{created, success, JsonBody},
    error::Result,
    services::accounts,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use openmusic_core::{validate, validation::UserPayload, MusicError, UserId};
use serde_json::{json, Value};

/// POST /users
pub async fn add_user(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let user = validate::<UserPayload>(body)?;
    let user_id = accounts::register(&app_state.storage, &app_state.auth_service, user).await?;

    Ok(created(json!({ "userId": user_id })))
}

/// GET /users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let user_id = UserId::new(id);
    let user = app_state
        .storage
        .get_user(&user_id)
        .await?
        .ok_or_else(|| MusicError::not_found("User", user_id.as_str()))?;

    Ok(success(json!({ "user": user })))
}
