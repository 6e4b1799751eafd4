//! Domain entities and value types.

pub mod user;

pub use user::*;
