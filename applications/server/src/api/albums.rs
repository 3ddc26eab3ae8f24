/// Album API routes
use crate::{
    api::{created, message, success, JsonBody},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use openmusic_core::{validate, validation::AlbumPayload, AlbumId, MusicError};
use serde_json::{json, Value};

/// POST /albums
pub async fn add_album(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let album = validate::<AlbumPayload>(body)?;
    let album_id = app_state.storage.create_album(album).await?;
    tracing::info!(%album_id, "album added");

    Ok(created(json!({ "albumId": album_id })))
}

/// GET /albums/:id
pub async fn get_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let album_id = AlbumId::new(id);
    let album = app_state
        .storage
        .get_album(&album_id)
        .await?
        .ok_or_else(|| MusicError::not_found("Album", album_id.as_str()))?;

    Ok(success(json!({ "album": album })))
}

/// PUT /albums/:id
pub async fn update_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>> {
    let album = validate::<AlbumPayload>(body)?;
    app_state.storage.update_album(&AlbumId::new(id), album).await?;

    Ok(message("Album updated"))
}

/// DELETE /albums/:id
pub async fn delete_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let album_id = AlbumId::new(id);
    app_state.storage.delete_album(&album_id).await?;
    tracing::info!(%album_id, "album deleted");

    Ok(message("Album deleted"))
}

/// Marks a like count served from the cache
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// POST /albums/:id/likes
pub async fn like_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<(StatusCode, Json<Value>)> {
    app_state
        .likes
        .like(&AlbumId::new(id), auth.user_id())
        .await?;

    Ok((StatusCode::CREATED, message("Album liked")))
}

/// DELETE /albums/:id/likes
pub async fn unlike_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    app_state
        .likes
        .unlike(&AlbumId::new(id), auth.user_id())
        .await?;

    Ok(message("Album unliked"))
}

/// GET /albums/:id/likes
pub async fn get_likes(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Response> {
    let count = app_state.likes.count(&AlbumId::new(id)).await?;
    let body = success(json!({ "likes": count.likes }));

    if count.cached {
        Ok(([(DATA_SOURCE_HEADER, "cache")], body).into_response())
    } else {
        Ok(body.into_response())
    }
}
