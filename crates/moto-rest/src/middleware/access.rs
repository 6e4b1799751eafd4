//! Access policy middleware.
//!
//! The policy is a deliberate configuration decision rather than a
//! hardcoded default: `allow_all` mirrors a development setup and is
//! logged loudly at startup; `authenticated` requires a bearer token on
//! the user endpoints. Token verification itself is a stub boundary.

use crate::responses::AppError;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use moto_config::AccessPolicy;
use moto_core::MotoError;

/// Enforces the configured access policy.
pub async fn access_policy_middleware(
    State(policy): State<AccessPolicy>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match policy {
        AccessPolicy::AllowAll => next.run(request).await,
        AccessPolicy::Authenticated => {
            if has_bearer_token(&request) {
                next.run(request).await
            } else {
                AppError(MotoError::unauthorized("Missing bearer token")).into_response()
            }
        }
    }
}

fn has_bearer_token(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty())
}
