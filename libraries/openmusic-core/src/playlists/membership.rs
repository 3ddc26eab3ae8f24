//! Playlist contents under the one-song-once invariant

use crate::error::{MusicError, Result};
use crate::playlists::ActivityRecorder;
use crate::storage::{CatalogPort, MembershipStore};
use crate::types::{ActivityAction, MembershipId, PlaylistId, SongId, SongSummary, UserId};
use std::sync::Arc;

/// Adds, removes and lists playlist songs, recording each change.
///
/// Callers must have run `AccessGuard::verify_access` for the acting user
/// before calling `add_song` or `remove_song`.
#[derive(Clone)]
pub struct MembershipManager {
    memberships: Arc<dyn MembershipStore>,
    catalog: Arc<dyn CatalogPort>,
    recorder: ActivityRecorder,
}

impl MembershipManager {
    pub fn new(
        memberships: Arc<dyn MembershipStore>,
        catalog: Arc<dyn CatalogPort>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            memberships,
            catalog,
            recorder,
        }
    }

    /// Link a catalog song to the playlist and record an `add` event
    pub async fn add_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        acting_user_id: &UserId,
    ) -> Result<MembershipId> {
        if !self.catalog.song_exists(song_id).await? {
            return Err(MusicError::not_found("Song", song_id.as_str()));
        }

        if self.memberships.membership_exists(playlist_id, song_id).await? {
            return Err(MusicError::invariant("song already in playlist"));
        }

        let membership_id = self
            .memberships
            .insert_membership(playlist_id, song_id)
            .await?;

        self.record(playlist_id, song_id, acting_user_id, ActivityAction::Add)
            .await?;

        Ok(membership_id)
    }

    /// Unlink a song from the playlist and record a `delete` event.
    ///
    /// Removing a song that is not in the playlist fails with
    /// `MusicError::Invariant` and records nothing.
    pub async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        acting_user_id: &UserId,
    ) -> Result<()> {
        if !self
            .memberships
            .delete_membership(playlist_id, song_id)
            .await?
        {
            return Err(MusicError::invariant(
                "song could not be removed, make sure it is in the playlist",
            ));
        }

        self.record(playlist_id, song_id, acting_user_id, ActivityAction::Delete)
            .await
    }

    /// Songs currently in the playlist, in stored order
    pub async fn list_songs(&self, playlist_id: &PlaylistId) -> Result<Vec<SongSummary>> {
        let song_ids = self.memberships.playlist_song_ids(playlist_id).await?;

        let mut songs = Vec::with_capacity(song_ids.len());
        for song_id in song_ids {
            // A song deleted between the two reads has already cascaded away
            if let Some(song) = self.catalog.song_summary(&song_id).await? {
                songs.push(song);
            }
        }

        Ok(songs)
    }

    // Runs after the mutation has committed
    async fn record(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        acting_user_id: &UserId,
        action: ActivityAction,
    ) -> Result<()> {
        match self
            .recorder
            .record_activity(playlist_id, song_id, acting_user_id, action)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::error!(
                    %playlist_id,
                    %song_id,
                    %action,
                    error = %err,
                    "membership changed but activity append failed"
                );
                Err(MusicError::ActivityNotRecorded {
                    playlist_id: playlist_id.to_string(),
                    song_id: song_id.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MockActivityLog, MockCatalogPort, MockIdentityPort, MockMembershipStore};
    use crate::types::{ActivityEvent, ActivityId};
    use chrono::Utc;

    fn ids() -> (PlaylistId, SongId, UserId) {
        (
            PlaylistId::new("pl-1"),
            SongId::new("song-1"),
            UserId::new("user-2"),
        )
    }

    fn catalog_with_song() -> MockCatalogPort {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_song_exists().returning(|_| Ok(true));
        catalog
    }

    fn accepting_log(expected: ActivityAction) -> MockActivityLog {
        let mut log = MockActivityLog::new();
        log.expect_append_activity()
            .withf(move |_, _, _, action| *action == expected)
            .times(1)
            .returning(|playlist, song, user, action| {
                Ok(ActivityEvent {
                    id: ActivityId::generate(),
                    playlist_id: playlist.clone(),
                    song_id: song.clone(),
                    user_id: user.clone(),
                    action,
                    time: Utc::now(),
                })
            });
        log
    }

    fn manager(
        memberships: MockMembershipStore,
        catalog: MockCatalogPort,
        log: MockActivityLog,
    ) -> MembershipManager {
        let catalog = Arc::new(catalog);
        let recorder = ActivityRecorder::new(
            Arc::new(log),
            Arc::new(MockIdentityPort::new()),
            catalog.clone(),
        );
        MembershipManager::new(Arc::new(memberships), catalog, recorder)
    }

    #[tokio::test]
    async fn add_song_inserts_and_records_add() {
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_membership_exists()
            .returning(|_, _| Ok(false));
        memberships
            .expect_insert_membership()
            .times(1)
            .returning(|_, _| Ok(MembershipId::new("ps-1")));

        let manager = manager(
            memberships,
            catalog_with_song(),
            accepting_log(ActivityAction::Add),
        );
        let (playlist_id, song_id, user_id) = ids();

        let id = manager
            .add_song(&playlist_id, &song_id, &user_id)
            .await
            .unwrap();
        assert_eq!(id.as_str(), "ps-1");
    }

    #[tokio::test]
    async fn add_unknown_song_is_not_found_and_touches_nothing() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_song_exists().returning(|_| Ok(false));
        let mut memberships = MockMembershipStore::new();
        memberships.expect_insert_membership().never();
        let mut log = MockActivityLog::new();
        log.expect_append_activity().never();

        let (playlist_id, song_id, user_id) = ids();
        let err = manager(memberships, catalog, log)
            .add_song(&playlist_id, &song_id, &user_id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn add_duplicate_song_is_rejected_by_precheck() {
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_membership_exists()
            .returning(|_, _| Ok(true));
        memberships.expect_insert_membership().never();
        let mut log = MockActivityLog::new();
        log.expect_append_activity().never();

        let (playlist_id, song_id, user_id) = ids();
        let err = manager(memberships, catalog_with_song(), log)
            .add_song(&playlist_id, &song_id, &user_id)
            .await
            .unwrap_err();
        assert!(err.is_invariant());
    }

    #[tokio::test]
    async fn add_duplicate_song_losing_the_race_is_invariant_too() {
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_membership_exists()
            .returning(|_, _| Ok(false));
        memberships
            .expect_insert_membership()
            .returning(|_, _| Err(MusicError::invariant("song already in playlist")));
        let mut log = MockActivityLog::new();
        log.expect_append_activity().never();

        let (playlist_id, song_id, user_id) = ids();
        let err = manager(memberships, catalog_with_song(), log)
            .add_song(&playlist_id, &song_id, &user_id)
            .await
            .unwrap_err();
        assert!(err.is_invariant());
    }

    #[tokio::test]
    async fn remove_song_records_delete() {
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_delete_membership()
            .returning(|_, _| Ok(true));

        let (playlist_id, song_id, user_id) = ids();
        manager(
            memberships,
            MockCatalogPort::new(),
            accepting_log(ActivityAction::Delete),
        )
        .remove_song(&playlist_id, &song_id, &user_id)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn remove_non_member_is_invariant_and_records_nothing() {
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_delete_membership()
            .returning(|_, _| Ok(false));
        let mut log = MockActivityLog::new();
        log.expect_append_activity().never();

        let (playlist_id, song_id, user_id) = ids();
        let err = manager(memberships, MockCatalogPort::new(), log)
            .remove_song(&playlist_id, &song_id, &user_id)
            .await
            .unwrap_err();
        assert!(err.is_invariant());
    }

    #[tokio::test]
    async fn failed_append_after_mutation_is_surfaced() {
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_delete_membership()
            .returning(|_, _| Ok(true));
        let mut log = MockActivityLog::new();
        log.expect_append_activity()
            .returning(|_, _, _, _| Err(MusicError::Database("disk I/O error".to_string())));

        let (playlist_id, song_id, user_id) = ids();
        let err = manager(memberships, MockCatalogPort::new(), log)
            .remove_song(&playlist_id, &song_id, &user_id)
            .await
            .unwrap_err();

        match err {
            MusicError::ActivityNotRecorded {
                playlist_id,
                song_id,
                reason,
            } => {
                assert_eq!(playlist_id, "pl-1");
                assert_eq!(song_id, "song-1");
                assert!(reason.contains("disk I/O error"));
            }
            other => panic!("expected ActivityNotRecorded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_songs_resolves_through_catalog() {
        let mut memberships = MockMembershipStore::new();
        memberships
            .expect_playlist_song_ids()
            .returning(|_| Ok(vec![SongId::new("song-1"), SongId::new("song-2")]));
        let mut catalog = MockCatalogPort::new();
        catalog.expect_song_summary().returning(|id| {
            Ok(Some(SongSummary {
                id: id.clone(),
                title: format!("Title {id}"),
                performer: "Performer".to_string(),
            }))
        });

        let songs = manager(memberships, catalog, MockActivityLog::new())
            .list_songs(&PlaylistId::new("pl-1"))
            .await
            .unwrap();

        let ids: Vec<&str> = songs.iter().map(|song| song.id.as_str()).collect();
        assert_eq!(ids, vec!["song-1", "song-2"]);
    }
}
