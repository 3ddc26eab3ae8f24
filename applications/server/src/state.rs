/// Shared application state
use crate::services::{AlbumLikes, AuthService};
use openmusic_core::{
    storage::ExportQueue, AccessGuard, ActivityRecorder, CollaborationManager, MembershipManager,
    PlaylistExporter,
};
use openmusic_storage::SqliteStorage;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Every component is wired to the same `SqliteStorage`, each through the
/// trait it needs.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<SqliteStorage>,
    pub auth_service: Arc<AuthService>,
    pub access: AccessGuard,
    pub memberships: MembershipManager,
    pub collaborations: CollaborationManager,
    pub activities: ActivityRecorder,
    pub exports: PlaylistExporter,
    pub likes: AlbumLikes,
}

impl AppState {
    pub fn new(
        storage: Arc<SqliteStorage>,
        auth_service: Arc<AuthService>,
        export_queue: Arc<dyn ExportQueue>,
        likes: AlbumLikes,
    ) -> Self {
        let access = AccessGuard::new(storage.clone());
        let activities = ActivityRecorder::new(storage.clone(), storage.clone(), storage.clone());
        let memberships =
            MembershipManager::new(storage.clone(), storage.clone(), activities.clone());
        let collaborations =
            CollaborationManager::new(access.clone(), storage.clone(), storage.clone());
        let exports = PlaylistExporter::new(access.clone(), export_queue);

        Self {
            storage,
            auth_service,
            access,
            memberships,
            collaborations,
            activities,
            exports,
            likes,
        }
    }
}
