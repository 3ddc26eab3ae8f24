/// Playlists API routes
use crate::{
    api::{created, message, success, JsonBody},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use openmusic_core::{
    storage::PlaylistStore, validate, validation::PlaylistPayload, CreatePlaylist, PlaylistId,
};
use serde_json::{json, Value};

/// POST /playlists
/// Create a playlist owned by the authenticated user
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let name = validate::<PlaylistPayload>(body)?;
    let playlist_id = app_state
        .storage
        .create_playlist(CreatePlaylist {
            name,
            owner: auth.user_id().clone(),
        })
        .await?;
    tracing::info!(%playlist_id, owner = %auth.user_id(), "playlist created");

    Ok(created(json!({ "playlistId": playlist_id })))
}

/// GET /playlists
/// Playlists the authenticated user owns or collaborates on
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlists = app_state
        .storage
        .playlists_for_user(auth.user_id())
        .await?;

    Ok(success(json!({ "playlists": playlists })))
}

/// DELETE /playlists/:id
/// Owner only; collaborations, songs and activities go with it
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist_id = PlaylistId::new(id);
    app_state
        .access
        .verify_owner(&playlist_id, auth.user_id())
        .await?;

    app_state.storage.delete_playlist(&playlist_id).await?;
    tracing::info!(%playlist_id, "playlist deleted");

    Ok(message("Playlist deleted"))
}
