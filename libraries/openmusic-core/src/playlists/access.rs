//! Ownership and shared-access decisions

use crate::error::{MusicError, Result};
use crate::storage::PlaylistStore;
use crate::types::{PlaylistId, UserId};
use std::sync::Arc;

/// Decides whether a user may read/alter a playlist, and whether they own it
#[derive(Clone)]
pub struct AccessGuard {
    playlists: Arc<dyn PlaylistStore>,
}

impl AccessGuard {
    pub fn new(playlists: Arc<dyn PlaylistStore>) -> Self {
        Self { playlists }
    }

    /// Succeeds only for the playlist's owner
    pub async fn verify_owner(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        let owner = self
            .playlists
            .playlist_owner(playlist_id)
            .await?
            .ok_or_else(|| MusicError::not_found("Playlist", playlist_id.as_str()))?;

        if &owner != user_id {
            tracing::debug!(%playlist_id, %user_id, "owner check rejected");
            return Err(MusicError::authorization(
                "you are not the owner of this playlist",
            ));
        }

        Ok(())
    }

    /// Succeeds for the owner and for every collaborator
    pub async fn verify_access(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        let access = self
            .playlists
            .playlist_access(playlist_id)
            .await?
            .ok_or_else(|| MusicError::not_found("Playlist", playlist_id.as_str()))?;

        if !access.permits(user_id) {
            tracing::debug!(%playlist_id, %user_id, "access check rejected");
            return Err(MusicError::authorization(
                "you are not allowed to access this playlist",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockPlaylistStore;
    use crate::types::PlaylistAccess;

    fn guard_with(store: MockPlaylistStore) -> AccessGuard {
        AccessGuard::new(Arc::new(store))
    }

    #[tokio::test]
    async fn owner_passes_owner_check() {
        let mut store = MockPlaylistStore::new();
        store
            .expect_playlist_owner()
            .returning(|_| Ok(Some(UserId::new("user-1"))));

        let guard = guard_with(store);
        guard
            .verify_owner(&PlaylistId::new("pl-1"), &UserId::new("user-1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_owner_fails_owner_check() {
        let mut store = MockPlaylistStore::new();
        store
            .expect_playlist_owner()
            .returning(|_| Ok(Some(UserId::new("user-1"))));

        let err = guard_with(store)
            .verify_owner(&PlaylistId::new("pl-1"), &UserId::new("user-2"))
            .await
            .unwrap_err();
        assert!(err.is_authorization());
    }

    #[tokio::test]
    async fn missing_playlist_is_not_found_for_both_checks() {
        let mut store = MockPlaylistStore::new();
        store.expect_playlist_owner().returning(|_| Ok(None));
        store.expect_playlist_access().returning(|_| Ok(None));
        let guard = guard_with(store);

        let playlist_id = PlaylistId::new("pl-404");
        let user_id = UserId::new("user-1");
        assert!(guard
            .verify_owner(&playlist_id, &user_id)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(guard
            .verify_access(&playlist_id, &user_id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn playlist_without_collaborators_admits_only_owner() {
        let mut store = MockPlaylistStore::new();
        store
            .expect_playlist_access()
            .returning(|_| Ok(Some(PlaylistAccess::owned_by(UserId::new("user-1")))));
        let guard = guard_with(store);
        let playlist_id = PlaylistId::new("pl-1");

        guard
            .verify_access(&playlist_id, &UserId::new("user-1"))
            .await
            .unwrap();
        let err = guard
            .verify_access(&playlist_id, &UserId::new("user-2"))
            .await
            .unwrap_err();
        assert!(err.is_authorization());
    }

    #[tokio::test]
    async fn collaborator_has_access_but_is_not_owner() {
        let mut store = MockPlaylistStore::new();
        store.expect_playlist_access().returning(|_| {
            Ok(Some(PlaylistAccess {
                owner: UserId::new("user-1"),
                collaborators: vec![UserId::new("user-2")],
            }))
        });
        store
            .expect_playlist_owner()
            .returning(|_| Ok(Some(UserId::new("user-1"))));
        let guard = guard_with(store);
        let playlist_id = PlaylistId::new("pl-1");
        let collaborator = UserId::new("user-2");

        guard.verify_access(&playlist_id, &collaborator).await.unwrap();
        let err = guard
            .verify_owner(&playlist_id, &collaborator)
            .await
            .unwrap_err();
        assert!(err.is_authorization());
    }
}
