/// Authentication API routes
///
/// Login issues an access/refresh token pair; the refresh token is stored so
/// logout can revoke it.
use crate::{
    api::{created, message, success, JsonBody},
    error::Result,
    services::accounts,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use openmusic_core::{
    validate,
    validation::{LoginPayload, RefreshTokenPayload},
    MusicError, UserId,
};
use serde_json::{json, Value};

/// POST /authentications
pub async fn login(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let credentials = validate::<LoginPayload>(body)?;
    let user_id =
        accounts::verify_credential(&app_state.storage, &app_state.auth_service, &credentials)
            .await?;

    let tokens = app_state.auth_service.issue_pair(&user_id)?;
    app_state
        .storage
        .add_refresh_token(&tokens.refresh_token, &user_id)
        .await?;
    tracing::info!(%user_id, "user logged in");

    Ok(created(json!({
        "accessToken": tokens.access_token,
        "refreshToken": tokens.refresh_token,
    })))
}

/// PUT /authentications
pub async fn refresh(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>> {
    let refresh_token = validate::<RefreshTokenPayload>(body)?;
    let user_id = check_refresh_token(&app_state, &refresh_token).await?;

    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(success(json!({ "accessToken": access_token })))
}

/// DELETE /authentications
pub async fn logout(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>> {
    let refresh_token = validate::<RefreshTokenPayload>(body)?;
    let user_id = check_refresh_token(&app_state, &refresh_token).await?;

    app_state.storage.delete_refresh_token(&refresh_token).await?;
    tracing::info!(%user_id, "refresh token revoked");

    Ok(message("Refresh token deleted"))
}

// Stored first, then signature and type; any failure reads the same.
async fn check_refresh_token(app_state: &AppState, token: &str) -> Result<UserId> {
    app_state.storage.verify_refresh_token(token).await?;

    app_state
        .auth_service
        .verify_refresh_token(token)
        .map_err(|e| {
            tracing::warn!("Refresh token verification failed: {}", e);
            MusicError::invariant("refresh token is not valid").into()
        })
}
