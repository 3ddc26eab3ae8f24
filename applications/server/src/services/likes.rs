/// Album likes with a read-through count cache
///
/// Counts are cached per album for `ttl`; liking or unliking drops the entry
/// so the next read goes to storage.
use crate::error::Result;
use lru::LruCache;
use openmusic_core::{AlbumId, MusicError, UserId};
use openmusic_storage::SqliteStorage;
use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

/// A like count and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeCount {
    pub likes: u64,
    pub cached: bool,
}

#[derive(Clone)]
pub struct AlbumLikes {
    storage: Arc<SqliteStorage>,
    cache: Arc<Mutex<LruCache<AlbumId, (u64, Instant)>>>,
    ttl: Duration,
}

impl AlbumLikes {
    /// `capacity` of 0 is treated as 1
    pub fn new(storage: Arc<SqliteStorage>, capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            storage,
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            ttl,
        }
    }

    /// # Errors
    ///
    /// `MusicError::NotFound` for an unknown album, `MusicError::Invariant`
    /// if the user already likes it
    pub async fn like(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        if !self.storage.album_exists(album_id).await? {
            return Err(MusicError::not_found("Album", album_id.as_str()).into());
        }
        if self.storage.album_liked(user_id, album_id).await? {
            return Err(MusicError::invariant("album already liked").into());
        }

        self.storage.like_album(user_id, album_id).await?;
        self.invalidate(album_id);
        tracing::info!(%album_id, %user_id, "album liked");

        Ok(())
    }

    /// # Errors
    ///
    /// `MusicError::NotFound` if the user does not like the album
    pub async fn unlike(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        if !self.storage.unlike_album(user_id, album_id).await? {
            return Err(MusicError::not_found("Like", album_id.as_str()).into());
        }

        self.invalidate(album_id);
        tracing::info!(%album_id, %user_id, "album unliked");

        Ok(())
    }

    pub async fn count(&self, album_id: &AlbumId) -> Result<LikeCount> {
        if let Some(likes) = self.cached(album_id) {
            return Ok(LikeCount {
                likes,
                cached: true,
            });
        }

        let likes = self.storage.album_like_count(album_id).await?;
        self.lock().put(album_id.clone(), (likes, Instant::now()));

        Ok(LikeCount {
            likes,
            cached: false,
        })
    }

    fn cached(&self, album_id: &AlbumId) -> Option<u64> {
        let mut cache = self.lock();
        match cache.get(album_id) {
            Some(&(likes, stored_at)) if stored_at.elapsed() < self.ttl => Some(likes),
            Some(_) => {
                cache.pop(album_id);
                None
            }
            None => None,
        }
    }

    fn invalidate(&self, album_id: &AlbumId) {
        self.lock().pop(album_id);
    }

    // The cache holds plain values, so a poisoned lock is still usable
    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<AlbumId, (u64, Instant)>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
