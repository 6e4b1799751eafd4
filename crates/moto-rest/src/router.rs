//! Main application router.

use crate::{
    controllers::{cache_controller, health_controller, user_controller},
    middleware::{access_policy_middleware, logging_middleware},
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use moto_config::{AccessPolicy, ServerConfig};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    access_policy: AccessPolicy,
) -> Router {
    let cors = create_cors_layer(server_config);

    if access_policy == AccessPolicy::AllowAll {
        warn!("Access policy is allow_all: user endpoints are open. Intended for development only.");
    }

    // User endpoints sit behind the access policy; diagnostics do not
    let api_router = Router::new()
        .nest("/users", user_controller::router())
        .layer(middleware::from_fn_with_state(
            access_policy,
            access_policy_middleware,
        ))
        .merge(cache_controller::router())
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints at /api/v1");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            let origins: Vec<axum::http::HeaderValue> = server_config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint.
async fn root() -> &'static str {
    "Moto user service"
}
