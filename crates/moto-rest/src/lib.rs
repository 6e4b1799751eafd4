//! # Moto REST
//!
//! HTTP layer for the Moto user service: Axum controllers, the response
//! envelope, request logging, and the configurable access policy. All
//! business behavior lives behind the injected `UserService`.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::{AppState, CacheContext};
