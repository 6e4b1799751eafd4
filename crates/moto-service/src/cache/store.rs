//! Cache store trait for abstracted caching operations.

use moto_core::MotoResult;
use async_trait::async_trait;
use std::time::Duration;

/// Cache store interface.
///
/// Implementations provide atomic per-key get/set/delete. Values are JSON
/// strings so the trait stays dyn-compatible; typed access goes through
/// [`CacheExt`].
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> MotoResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> MotoResult<()>;

    /// Delete a value from the cache.
    ///
    /// Deleting a key that does not exist is a no-op success; returns
    /// `true` only when a key was actually removed.
    async fn delete(&self, key: &str) -> MotoResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> MotoResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> MotoResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all CacheStore implementations
impl<T: CacheStore + ?Sized> CacheExt for T {}
