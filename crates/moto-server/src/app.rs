//! Application wiring: pools, services, cache layer, router.

use moto_config::AppConfig;
use moto_core::{MotoError, MotoResult};
use moto_repository::{create_pool, run_migrations, PgUserRepository};
use moto_rest::{create_router, AppState, CacheContext};
use moto_service::{
    CacheStore, CachedUserService, KeyScheme, PasswordHasher, RedisCacheStore, UserService,
    UserServiceImpl,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Builds the application and serves it until shutdown.
pub async fn serve(config: AppConfig) -> MotoResult<()> {
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    let cache = build_cache_store(&config);
    let cache_enabled = cache.is_enabled();

    let repository = Arc::new(PgUserRepository::new(pool));
    let inner = Arc::new(UserServiceImpl::new(
        repository,
        Arc::new(PasswordHasher::new()),
    ));

    let keys = KeyScheme::new(config.cache.collection.clone(), config.cache.key_separator)?;
    let cached = CachedUserService::new(inner, cache, keys, config.cache.ttl());
    let stats = cached.stats();

    let state = AppState::new(
        Arc::new(cached) as Arc<dyn UserService>,
        CacheContext {
            collection: config.cache.collection.clone(),
            ttl_secs: config.cache.ttl_secs,
            enabled: cache_enabled,
            stats,
        },
    );

    let router = create_router(state, &config.server, config.security.access_policy);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| MotoError::Internal(format!("Failed to bind {}: {}", bind_address, e)))?;

    info!("REST API listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MotoError::Internal(format!("Server error: {}", e)))?;

    info!("Server shut down");
    Ok(())
}

/// Builds the cache store from configuration.
///
/// A cache that cannot be constructed degrades to the disabled store; the
/// API stays up without the performance benefit.
fn build_cache_store(config: &AppConfig) -> Arc<dyn CacheStore> {
    if !config.cache.enabled {
        info!("Response cache disabled by configuration");
        return Arc::new(RedisCacheStore::disabled());
    }

    match deadpool_redis::Config::from_url(&config.cache.url)
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
    {
        Ok(pool) => {
            info!("Redis cache pool created for {}", config.cache.url);
            Arc::new(RedisCacheStore::new(Arc::new(pool)))
        }
        Err(e) => {
            warn!("Failed to create Redis pool, running without cache: {}", e);
            Arc::new(RedisCacheStore::disabled())
        }
    }
}

/// Completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received terminate signal, shutting down"),
    }
}
