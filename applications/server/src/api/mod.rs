/// API route modules
pub mod activities;
pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod exports;
pub mod health;
pub mod playlist_songs;
pub mod playlists;
pub mod songs;
pub mod users;

use crate::{error::ServerError, middleware, state::AppState};
use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use openmusic_core::MusicError;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// Users, authentications and the catalog are public, except for liking and
/// unliking albums. Playlist, collaboration, activity and export routes
/// require a bearer access token.
pub fn create_router(app_state: AppState) -> Router {
    let require_auth = axum_middleware::from_fn_with_state(
        Arc::clone(&app_state.auth_service),
        middleware::auth_middleware,
    );

    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/users", post(users::add_user))
        .route("/users/:id", get(users::get_user))
        .route(
            "/authentications",
            post(authentications::login)
                .put(authentications::refresh)
                .delete(authentications::logout),
        )
        .route("/albums", post(albums::add_album))
        .route(
            "/albums/:id",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
        // Reading the count is public, changing it needs a token
        .route(
            "/albums/:id/likes",
            get(albums::get_likes).merge(
                post(albums::like_album)
                    .delete(albums::unlike_album)
                    .route_layer(require_auth.clone()),
            ),
        )
        .route("/songs", post(songs::add_song).get(songs::list_songs))
        .route(
            "/songs/:id",
            get(songs::get_song)
                .put(songs::update_song)
                .delete(songs::delete_song),
        );

    let protected_routes = Router::new()
        .route(
            "/playlists",
            post(playlists::create_playlist).get(playlists::list_playlists),
        )
        .route(
            "/playlists/:id",
            axum::routing::delete(playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs",
            post(playlist_songs::add_song)
                .get(playlist_songs::list_songs)
                .delete(playlist_songs::remove_song),
        )
        .route("/playlists/:id/activities", get(activities::get_activities))
        .route(
            "/collaborations",
            post(collaborations::add_collaboration).delete(collaborations::delete_collaboration),
        )
        .route("/export/playlists/:id", post(exports::export_playlist))
        .layer(require_auth);

    public_routes
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Raw JSON request body.
///
/// Malformed JSON or a missing content type is reported like any other bad
/// payload instead of with axum's plain-text rejection.
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| MusicError::invalid_payload(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `200 {"status":"success","data":...}`
pub fn success(data: Value) -> Json<Value> {
    Json(json!({ "status": "success", "data": data }))
}

/// `201 {"status":"success","data":...}`
pub fn created(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, success(data))
}

/// `200 {"status":"success","message":...}`
pub fn message(message: &str) -> Json<Value> {
    Json(json!({ "status": "success", "message": message }))
}
