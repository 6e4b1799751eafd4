//! # Moto Service
//!
//! Business logic for the Moto user service: DTOs, the `UserService`
//! trait with its repository-backed implementation, and the cache-aside
//! layer ([`CachedUserService`]) that fronts list/detail reads with a
//! TTL-bounded response cache and invalidates on writes.

pub mod cache;
pub mod cached;
pub mod dto;
pub mod password;
pub mod user_service;

mod service_impl;

pub use cache::{
    CacheExt, CacheStats, CacheStatsSnapshot, CacheStore, KeyScheme, MemoryCacheStore,
    RedisCacheStore, DEFAULT_TTL,
};
pub use cached::CachedUserService;
pub use dto::*;
pub use password::PasswordHasher;
pub use service_impl::UserServiceImpl;
pub use user_service::UserService;
