//! # Moto Repository
//!
//! Data access layer for the Moto user service:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>   (domain interface)
//! PgUserRepository               (SQLx / PostgreSQL)
//! MemoryUserRepository           (in-process, for tests and DB-less runs)
//! ```

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::MemoryUserRepository;
pub use pool::{create_pool, health_check, run_migrations};
pub use postgres::PgUserRepository;
pub use traits::UserRepository;
