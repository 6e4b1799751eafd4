//! # Moto Config
//!
//! Layered configuration for the Moto user service: TOML files plus
//! `MOTO_`-prefixed environment variable overrides, with post-load
//! validation of the cache and security sections.

pub mod app_config;
pub mod loader;
pub mod validation;

pub use app_config::*;
pub use loader::ConfigLoader;
pub use validation::validate_config;
