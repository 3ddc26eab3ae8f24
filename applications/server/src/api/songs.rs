/// Song (catalog) API routes
use crate::{
    api::{created, message, success, JsonBody},
    error::Result,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use openmusic_core::{validate, validation::SongPayload, MusicError, SongId, SongQuery};
use serde_json::{json, Value};

/// POST /songs
pub async fn add_song(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Value>)> {
    let song = validate::<SongPayload>(body)?;
    let song_id = app_state.storage.create_song(song).await?;
    tracing::info!(%song_id, "song added");

    Ok(created(json!({ "songId": song_id })))
}

/// GET /songs?title=&performer=
pub async fn list_songs(
    Query(query): Query<SongQuery>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let songs = app_state.storage.search_songs(&query).await?;

    Ok(success(json!({ "songs": songs })))
}

/// GET /songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let song_id = SongId::new(id);
    let song = app_state
        .storage
        .get_song(&song_id)
        .await?
        .ok_or_else(|| MusicError::not_found("Song", song_id.as_str()))?;

    Ok(success(json!({ "song": song })))
}

/// PUT /songs/:id
pub async fn update_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>> {
    let song = validate::<SongPayload>(body)?;
    app_state.storage.update_song(&SongId::new(id), song).await?;

    Ok(message("Song updated"))
}

/// DELETE /songs/:id
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let song_id = SongId::new(id);
    app_state.storage.delete_song(&song_id).await?;
    tracing::info!(%song_id, "song deleted");

    Ok(message("Song deleted"))
}
