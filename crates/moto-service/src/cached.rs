//! Cache-aside layer over the user service.
//!
//! Decorates an inner [`UserService`] with a response cache: reads check
//! the cache first and populate it on a miss; writes go to the inner
//! service first and invalidate the affected keys once the mutation has
//! been persisted.
//!
//! Cache-store failures never fail an operation. A failed lookup degrades
//! to a miss; a failed population or invalidation is logged and counted,
//! and the operation still succeeds. A write whose invalidation failed
//! leaves a stale entry behind until the TTL clears it, which is why those
//! failures are surfaced through [`CacheStats`].
//!
//! The usual cache-aside race stands: a reader that straddles a writer's
//! persist step can repopulate a key with pre-write data. That window is
//! bounded by the TTL and is accepted in exchange for keeping reads cheap;
//! no cross-store transactions or locks are taken here.

use crate::cache::{CacheExt, CacheStats, CacheStatsSnapshot, CacheStore, KeyScheme};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use moto_core::{MotoResult, UserId};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Cache-aside coordinator for the user service.
pub struct CachedUserService {
    inner: Arc<dyn UserService>,
    cache: Arc<dyn CacheStore>,
    keys: KeyScheme,
    ttl: Duration,
    stats: Arc<CacheStats>,
}

impl CachedUserService {
    /// Creates a new cache-aside layer over `inner`.
    pub fn new(
        inner: Arc<dyn UserService>,
        cache: Arc<dyn CacheStore>,
        keys: KeyScheme,
        ttl: Duration,
    ) -> Self {
        Self {
            inner,
            cache,
            keys,
            ttl,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Returns the shared counters for this coordinator's key prefix.
    #[must_use]
    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Point-in-time snapshot of the counters.
    #[must_use]
    pub fn stats_snapshot(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns the key scheme in use.
    #[must_use]
    pub fn keys(&self) -> &KeyScheme {
        &self.keys
    }

    /// Cache lookup that degrades to a miss on store failure.
    async fn lookup<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!("Cache HIT for {}", key);
                self.stats.record_hit();
                Some(value)
            }
            Ok(None) => {
                debug!("Cache MISS for {}", key);
                self.stats.record_miss();
                None
            }
            Err(e) => {
                warn!("Cache lookup failed for {}, treating as miss: {}", key, e);
                self.stats.record_error();
                self.stats.record_miss();
                None
            }
        }
    }

    /// Cache population; failure is logged and counted, never surfaced.
    async fn populate<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, self.ttl).await {
            warn!("Cache population failed for {}: {}", key, e);
            self.stats.record_error();
        }
    }

    /// Key invalidation; failure is logged and counted, never surfaced.
    /// Deleting an absent key counts as a successful invalidation.
    async fn invalidate(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(_) => {
                debug!("Cache invalidated for {}", key);
                self.stats.record_invalidation();
            }
            Err(e) => {
                warn!(
                    "Cache invalidation failed for {}, stale entry persists until TTL: {}",
                    key, e
                );
                self.stats.record_error();
            }
        }
    }
}

#[async_trait]
impl UserService for CachedUserService {
    async fn list_users(&self) -> MotoResult<UserListResponse> {
        let key = self.keys.collection_key();

        if let Some(cached) = self.lookup::<UserListResponse>(&key).await {
            return Ok(cached);
        }

        let response = self.inner.list_users().await?;
        self.populate(&key, &response).await;
        Ok(response)
    }

    async fn get_user(&self, id: UserId) -> MotoResult<UserResponse> {
        let key = self.keys.instance_key(id);

        if let Some(cached) = self.lookup::<UserResponse>(&key).await {
            return Ok(cached);
        }

        // NotFound propagates before the cache is touched: no negative caching
        let response = self.inner.get_user(id).await?;
        self.populate(&key, &response).await;
        Ok(response)
    }

    async fn create_user(&self, request: CreateUserRequest) -> MotoResult<UserResponse> {
        // Persist first; a failed create must leave the cache untouched
        let response = self.inner.create_user(request).await?;

        // No instance key exists yet for a new record
        self.invalidate(&self.keys.collection_key()).await;
        Ok(response)
    }

    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> MotoResult<UserResponse> {
        let response = self.inner.update_user(id, request).await?;

        // Two independent idempotent deletes; ordering between them is free
        self.invalidate(&self.keys.instance_key(id)).await;
        self.invalidate(&self.keys.collection_key()).await;
        Ok(response)
    }

    async fn delete_user(&self, id: UserId) -> MotoResult<()> {
        self.inner.delete_user(id).await?;

        self.invalidate(&self.keys.instance_key(id)).await;
        self.invalidate(&self.keys.collection_key()).await;
        Ok(())
    }
}

impl std::fmt::Debug for CachedUserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedUserService")
            .field("keys", &self.keys)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
