//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use openmusic_server::{
    create_router,
    jobs::{ExportJobQueue, ExportWorker},
    services::auth::MIN_PASSWORD_COST,
    AlbumLikes, AppState, AuthService,
};
use openmusic_storage::SqliteStorage;
use serde_json::{json, Value};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Router over a fresh SQLite file; the directory is removed on drop
pub struct TestApp {
    pub router: Router,
    pub storage: Arc<SqliteStorage>,
    pub auth_service: Arc<AuthService>,
    /// Where the export worker writes finished exports
    pub outbox: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = openmusic_storage::create_pool(&db_url).await.unwrap();
        openmusic_storage::run_migrations(&pool).await.unwrap();
        let storage = Arc::new(SqliteStorage::new(pool));

        let auth_service = Arc::new(
            AuthService::new("test-secret-key".to_string(), 1, 1)
                .with_password_cost(MIN_PASSWORD_COST),
        );

        let likes = AlbumLikes::new(storage.clone(), 16, Duration::from_secs(60));
        let (export_queue, export_receiver) = ExportJobQueue::channel();
        let app_state = AppState::new(
            storage.clone(),
            auth_service.clone(),
            Arc::new(export_queue),
            likes,
        );

        let outbox = temp_dir.path().join("exports");
        ExportWorker::new(
            storage.clone(),
            app_state.memberships.clone(),
            outbox.clone(),
        )
        .spawn(export_receiver);

        Self {
            router: create_router(app_state),
            storage,
            auth_service,
            outbox,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and return status plus parsed JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, _, json) = self.send(request).await;
        (status, json)
    }

    /// Like `request`, also returning the response headers
    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
    ) -> (StatusCode, header::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, header::HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, headers, json)
    }

    /// Register a user over HTTP and return its id
    pub async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/users",
                None,
                Some(json!({
                    "username": username,
                    "password": TEST_PASSWORD,
                    "fullname": format!("{username} Tester"),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"]["userId"].as_str().unwrap().to_string()
    }

    /// Register and log in; returns (user id, access token)
    pub async fn login_as(&self, username: &str) -> (String, String) {
        let user_id = self.register(username).await;
        let (status, body) = self
            .request(
                Method::POST,
                "/authentications",
                None,
                Some(json!({ "username": username, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "login failed: {body}");
        let token = body["data"]["accessToken"].as_str().unwrap().to_string();
        (user_id, token)
    }

    pub async fn create_song(&self, title: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/songs",
                None,
                Some(json!({
                    "title": title,
                    "year": 2008,
                    "genre": "Pop",
                    "performer": "Coldplay",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create song failed: {body}");
        body["data"]["songId"].as_str().unwrap().to_string()
    }

    pub async fn create_playlist(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/playlists",
                Some(token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create playlist failed: {body}");
        body["data"]["playlistId"].as_str().unwrap().to_string()
    }

    pub async fn create_album(&self, name: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/albums",
                None,
                Some(json!({ "name": name, "year": 2008 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create album failed: {body}");
        body["data"]["albumId"].as_str().unwrap().to_string()
    }

    /// Wait for the export worker to write its first file
    pub async fn wait_for_export(&self) -> Value {
        for _ in 0..100 {
            if let Ok(mut entries) = std::fs::read_dir(&self.outbox) {
                if let Some(Ok(entry)) = entries.next() {
                    let bytes = std::fs::read(entry.path()).unwrap();
                    if let Ok(document) = serde_json::from_slice(&bytes) {
                        return document;
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("no export written to {}", self.outbox.display());
    }
}
