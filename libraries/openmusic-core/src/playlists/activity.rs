//! Append-only audit trail of playlist membership changes

use crate::error::Result;
use crate::storage::{ActivityLog, CatalogPort, IdentityPort};
use crate::types::{ActivityAction, ActivityEntry, ActivityEvent, PlaylistId, SongId, UserId};
use std::collections::HashMap;
use std::sync::Arc;

/// Records membership changes and lists them for display
#[derive(Clone)]
pub struct ActivityRecorder {
    log: Arc<dyn ActivityLog>,
    identity: Arc<dyn IdentityPort>,
    catalog: Arc<dyn CatalogPort>,
}

impl ActivityRecorder {
    pub fn new(
        log: Arc<dyn ActivityLog>,
        identity: Arc<dyn IdentityPort>,
        catalog: Arc<dyn CatalogPort>,
    ) -> Self {
        Self {
            log,
            identity,
            catalog,
        }
    }

    /// Append one event stamped with the server's time
    pub async fn record_activity(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<ActivityEvent> {
        let event = self
            .log
            .append_activity(playlist_id, song_id, user_id, action)
            .await?;
        tracing::info!(
            %playlist_id,
            %song_id,
            %user_id,
            %action,
            activity_id = %event.id,
            "activity recorded"
        );
        Ok(event)
    }

    /// Every event of the playlist with the acting user's name and the
    /// song's title, oldest first.
    ///
    /// Events whose user or song no longer resolves are left out, the same
    /// as an inner join would.
    pub async fn get_activities(&self, playlist_id: &PlaylistId) -> Result<Vec<ActivityEntry>> {
        let mut events = self.log.activities_for(playlist_id).await?;
        events.sort_by_key(|event| event.time);

        let mut usernames: HashMap<UserId, Option<String>> = HashMap::new();
        let mut titles: HashMap<SongId, Option<String>> = HashMap::new();
        let mut entries = Vec::with_capacity(events.len());

        for event in events {
            if !usernames.contains_key(&event.user_id) {
                let name = self.identity.user_display_name(&event.user_id).await?;
                usernames.insert(event.user_id.clone(), name);
            }
            if !titles.contains_key(&event.song_id) {
                let title = self
                    .catalog
                    .song_summary(&event.song_id)
                    .await?
                    .map(|song| song.title);
                titles.insert(event.song_id.clone(), title);
            }

            let (Some(Some(username)), Some(Some(title))) =
                (usernames.get(&event.user_id), titles.get(&event.song_id))
            else {
                tracing::warn!(
                    activity_id = %event.id,
                    "skipping activity with dangling reference"
                );
                continue;
            };

            entries.push(ActivityEntry {
                username: username.clone(),
                title: title.clone(),
                action: event.action,
                time: event.time,
            });
        }

        Ok(entries)
    }
}
