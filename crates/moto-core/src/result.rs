//! Result type alias for Moto.

use crate::MotoError;

/// A specialized `Result` type for Moto operations.
pub type MotoResult<T> = Result<T, MotoError>;
