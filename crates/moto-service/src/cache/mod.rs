//! Response caching infrastructure.
//!
//! A cache-aside layer: callers check the cache first and populate it on a
//! miss; writes invalidate the affected keys. The store abstraction keeps
//! the backend swappable between Redis and an in-memory map.

mod keys;
mod memory_store;
mod redis_store;
mod stats;
mod store;

pub use keys::KeyScheme;
pub use memory_store::MemoryCacheStore;
pub use redis_store::{RedisCacheStore, DEFAULT_TTL};
pub use stats::{CacheStats, CacheStatsSnapshot};
pub use store::{CacheExt, CacheStore};
