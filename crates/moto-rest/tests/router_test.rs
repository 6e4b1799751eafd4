//! End-to-end handler tests: the full router driven through `oneshot`,
//! with in-memory repository and cache store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use moto_config::{AccessPolicy, ServerConfig};
use moto_repository::MemoryUserRepository;
use moto_rest::{create_router, AppState, CacheContext};
use moto_service::{
    CacheStore, CachedUserService, KeyScheme, MemoryCacheStore, PasswordHasher, UserService,
    UserServiceImpl,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_router(policy: AccessPolicy) -> Router {
    let repo = Arc::new(MemoryUserRepository::new());
    let cache = Arc::new(MemoryCacheStore::new());
    let inner = Arc::new(UserServiceImpl::new(
        repo,
        Arc::new(PasswordHasher::new()),
    ));
    let cached = CachedUserService::new(
        inner,
        cache as Arc<dyn CacheStore>,
        KeyScheme::new("users", ':').unwrap(),
        Duration::from_secs(300),
    );
    let stats = cached.stats();
    let state = AppState::new(
        Arc::new(cached) as Arc<dyn UserService>,
        CacheContext {
            collection: "users".to_string(),
            ttl_secs: 300,
            enabled: true,
            stats,
        },
    );
    create_router(state, &ServerConfig::default(), policy)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_user_request(email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "email": email,
                "password": "password123",
                "user_type": "rider"
            })
            .to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn list_users_empty() {
    let router = test_router(AccessPolicy::AllowAll);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["count"], json!(0));
}

#[tokio::test]
async fn create_then_get_user() {
    let router = test_router(AccessPolicy::AllowAll);

    let response = router
        .clone()
        .oneshot(create_user_request("rider@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert!(created["data"].get("password_hash").is_none());

    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["data"]["email"], json!("rider@example.com"));
}

#[tokio::test]
async fn get_missing_user_is_404() {
    let router = test_router(AccessPolicy::AllowAll);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn malformed_user_id_is_400() {
    let router = test_router(AccessPolicy::AllowAll);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_create_payload_is_400() {
    let router = test_router(AccessPolicy::AllowAll);

    let response = router.oneshot(create_user_request("not-an-email")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    assert_eq!(body["error"]["details"][0]["field"], json!("email"));
}

#[tokio::test]
async fn delete_user_returns_204() {
    let router = test_router(AccessPolicy::AllowAll);

    let response = router
        .clone()
        .oneshot(create_user_request("gone@example.com"))
        .await
        .unwrap();
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cache_stats_reflects_traffic() {
    let router = test_router(AccessPolicy::AllowAll);

    // miss then hit on the list path
    for _ in 0..2 {
        router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
    }

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/cache-stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["collection"], json!("users"));
    assert_eq!(body["data"]["counters"]["misses"], json!(1));
    assert_eq!(body["data"]["counters"]["hits"], json!(1));
}

#[tokio::test]
async fn authenticated_policy_requires_bearer_token() {
    let router = test_router(AccessPolicy::Authenticated);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .header(header::AUTHORIZATION, "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let router = test_router(AccessPolicy::Authenticated);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
