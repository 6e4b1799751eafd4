//! Cache diagnostics controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use moto_service::CacheStatsSnapshot;
use serde::{Deserialize, Serialize};

/// Cache statistics response: enough to answer "is the cache doing
/// anything".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    /// Collection name (the cache key prefix).
    pub collection: String,
    /// Configured entry TTL in seconds.
    pub ttl_secs: u64,
    /// Whether a cache backend is active.
    pub enabled: bool,
    /// Hit/miss/invalidation counters since process start.
    pub counters: CacheStatsSnapshot,
}

/// Creates the cache diagnostics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/cache-stats", get(cache_stats))
}

/// Get cache statistics.
async fn cache_stats(State(state): State<AppState>) -> ApiResult<CacheStatsResponse> {
    let cache = &state.cache;
    ok(CacheStatsResponse {
        collection: cache.collection.clone(),
        ttl_secs: cache.ttl_secs,
        enabled: cache.enabled,
        counters: cache.stats.snapshot(),
    })
}
