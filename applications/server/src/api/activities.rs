/// Playlist activity API routes
use crate::{api::success, error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use openmusic_core::PlaylistId;
use serde_json::{json, Value};

/// GET /playlists/:id/activities
/// Add/delete history, oldest first; owner and collaborators only
pub async fn get_activities(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .access
        .verify_access(&playlist_id, auth.user_id())
        .await?;
    let activities = app_state.activities.get_activities(&playlist_id).await?;
    tracing::debug!(%playlist_id, count = activities.len(), "activities listed");

    Ok(success(json!({
        "playlistId": playlist_id,
        "activities": activities,
    })))
}
