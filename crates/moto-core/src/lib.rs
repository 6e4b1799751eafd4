//! # Moto Core
//!
//! Core types, domain entities, and error definitions shared across all
//! layers of the Moto user service.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
