/// Playlist song API routes
///
/// Owner and collaborators alike; every change lands in the activity log.
use crate::{
    api::{message, success, JsonBody},
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
    storage::PlaylistStore, validate, validation::PlaylistSongPayload, MusicError, PlaylistId,
    PlaylistWithSongs,
};
use serde_json::{json, Value};

/// POST /playlists/:id/songs
pub async fn add_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let song_id = validate::<PlaylistSongPayload>(body)?;
    let playlist_id = PlaylistId::new(id);

    app_state
        .access
        .verify_access(&playlist_id, auth.user_id())
        .await?;
    app_state
        .memberships
        .add_song(&playlist_id, &song_id, auth.user_id())
        .await?;

    Ok((StatusCode::CREATED, message("Song added to playlist")))
}

/// GET /playlists/:id/songs
pub async fn list_songs(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .access
        .verify_access(&playlist_id, auth.user_id())
        .await?;

    let playlist = app_state
        .storage
        .get_playlist(&playlist_id)
        .await?
        .ok_or_else(|| MusicError::not_found("Playlist", playlist_id.as_str()))?;
    let songs = app_state.memberships.list_songs(&playlist_id).await?;
    let playlist = PlaylistWithSongs { playlist, songs };

    Ok(success(json!({ "playlist": playlist })))
}

/// DELETE /playlists/:id/songs
pub async fn remove_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>> {
    let song_id = validate::<PlaylistSongPayload>(body)?;
    let playlist_id = PlaylistId::new(id);

    app_state
        .access
        .verify_access(&playlist_id, auth.user_id())
        .await?;
    app_state
        .memberships
        .remove_song(&playlist_id, &song_id, auth.user_id())
        .await?;

    Ok(message("Song removed from playlist"))
}
