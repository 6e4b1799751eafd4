//! Application state for Axum handlers.

use moto_service::{CacheStats, UserService};
use std::sync::Arc;

/// Cache configuration surfaced by the cache-stats endpoint.
#[derive(Clone)]
pub struct CacheContext {
    /// Collection name (the cache key prefix).
    pub collection: String,
    /// Configured entry TTL in seconds.
    pub ttl_secs: u64,
    /// Whether a cache backend is active.
    pub enabled: bool,
    /// Live counters shared with the coordinator.
    pub stats: Arc<CacheStats>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub cache: CacheContext,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, cache: CacheContext) -> Self {
        Self {
            user_service,
            cache,
        }
    }
}
