//! Owner-managed shared access grants

use crate::error::{MusicError, Result};
use crate::playlists::AccessGuard;
use crate::storage::{CollaborationStore, IdentityPort};
use crate::types::{Collaboration, PlaylistId, UserId};
use std::sync::Arc;

/// Grants and revokes collaborator access; only the owner may do either
#[derive(Clone)]
pub struct CollaborationManager {
    guard: AccessGuard,
    collaborations: Arc<dyn CollaborationStore>,
    identity: Arc<dyn IdentityPort>,
}

impl CollaborationManager {
    pub fn new(
        guard: AccessGuard,
        collaborations: Arc<dyn CollaborationStore>,
        identity: Arc<dyn IdentityPort>,
    ) -> Self {
        Self {
            guard,
            collaborations,
            identity,
        }
    }

    /// Grant `user_id` access to the playlist
    pub async fn add_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
        acting_user_id: &UserId,
    ) -> Result<Collaboration> {
        self.guard.verify_owner(playlist_id, acting_user_id).await?;

        if !self.identity.user_exists(user_id).await? {
            return Err(MusicError::not_found("User", user_id.as_str()));
        }

        if self
            .collaborations
            .collaboration_exists(playlist_id, user_id)
            .await?
        {
            return Err(MusicError::invariant(
                "user is already a collaborator on this playlist",
            ));
        }

        let collaboration = self
            .collaborations
            .insert_collaboration(playlist_id, user_id)
            .await?;
        tracing::info!(
            %playlist_id,
            %user_id,
            collaboration_id = %collaboration.id,
            "collaborator added"
        );

        Ok(collaboration)
    }

    /// Revoke `user_id`'s access.
    ///
    /// Idempotent: revoking a grant that does not exist succeeds. The
    /// returned flag tells whether a grant was actually removed.
    pub async fn delete_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
        acting_user_id: &UserId,
    ) -> Result<bool> {
        self.guard.verify_owner(playlist_id, acting_user_id).await?;

        let removed = self
            .collaborations
            .delete_collaboration(playlist_id, user_id)
            .await?;
        if removed {
            tracing::info!(%playlist_id, %user_id, "collaborator removed");
        } else {
            tracing::debug!(%playlist_id, %user_id, "no collaboration to remove");
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MockCollaborationStore, MockIdentityPort, MockPlaylistStore};
    use crate::types::CollaborationId;

    fn owned_by_user_1() -> AccessGuard {
        let mut playlists = MockPlaylistStore::new();
        playlists
            .expect_playlist_owner()
            .returning(|_| Ok(Some(UserId::new("user-1"))));
        AccessGuard::new(Arc::new(playlists))
    }

    fn known_users() -> MockIdentityPort {
        let mut identity = MockIdentityPort::new();
        identity
            .expect_user_exists()
            .returning(|id| Ok(id.as_str() != "user-404"));
        identity
    }

    fn manager(
        collaborations: MockCollaborationStore,
        identity: MockIdentityPort,
    ) -> CollaborationManager {
        CollaborationManager::new(owned_by_user_1(), Arc::new(collaborations), Arc::new(identity))
    }

    #[tokio::test]
    async fn owner_grants_access() {
        let mut collaborations = MockCollaborationStore::new();
        collaborations
            .expect_collaboration_exists()
            .returning(|_, _| Ok(false));
        collaborations
            .expect_insert_collaboration()
            .times(1)
            .returning(|playlist, user| {
                Ok(Collaboration {
                    id: CollaborationId::new("collab-1"),
                    playlist_id: playlist.clone(),
                    user_id: user.clone(),
                })
            });

        let collaboration = manager(collaborations, known_users())
            .add_collaboration(
                &PlaylistId::new("pl-1"),
                &UserId::new("user-2"),
                &UserId::new("user-1"),
            )
            .await
            .unwrap();

        assert_eq!(collaboration.id.as_str(), "collab-1");
        assert_eq!(collaboration.user_id.as_str(), "user-2");
    }

    #[tokio::test]
    async fn non_owner_cannot_grant() {
        let mut collaborations = MockCollaborationStore::new();
        collaborations.expect_insert_collaboration().never();

        let err = manager(collaborations, MockIdentityPort::new())
            .add_collaboration(
                &PlaylistId::new("pl-1"),
                &UserId::new("user-3"),
                &UserId::new("user-2"),
            )
            .await
            .unwrap_err();
        assert!(err.is_authorization());
    }

    #[tokio::test]
    async fn granting_unknown_user_is_not_found() {
        let mut collaborations = MockCollaborationStore::new();
        collaborations.expect_insert_collaboration().never();

        let err = manager(collaborations, known_users())
            .add_collaboration(
                &PlaylistId::new("pl-1"),
                &UserId::new("user-404"),
                &UserId::new("user-1"),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn duplicate_grant_is_invariant() {
        let mut collaborations = MockCollaborationStore::new();
        collaborations
            .expect_collaboration_exists()
            .returning(|_, _| Ok(true));
        collaborations.expect_insert_collaboration().never();

        let err = manager(collaborations, known_users())
            .add_collaboration(
                &PlaylistId::new("pl-1"),
                &UserId::new("user-2"),
                &UserId::new("user-1"),
            )
            .await
            .unwrap_err();
        assert!(err.is_invariant());
    }

    #[tokio::test]
    async fn revoking_missing_grant_succeeds() {
        let mut collaborations = MockCollaborationStore::new();
        collaborations
            .expect_delete_collaboration()
            .returning(|_, _| Ok(false));

        let removed = manager(collaborations, MockIdentityPort::new())
            .delete_collaboration(
                &PlaylistId::new("pl-1"),
                &UserId::new("user-2"),
                &UserId::new("user-1"),
            )
            .await
            .unwrap();
        assert!(!removed);
    }

    #[tokio::test]
    async fn non_owner_cannot_revoke() {
        let mut collaborations = MockCollaborationStore::new();
        collaborations.expect_delete_collaboration().never();

        let err = manager(collaborations, MockIdentityPort::new())
            .delete_collaboration(
                &PlaylistId::new("pl-1"),
                &UserId::new("user-2"),
                &UserId::new("user-2"),
            )
            .await
            .unwrap_err();
        assert!(err.is_authorization());
    }
}
