//! HTTP middleware.

mod access;
mod logging;

pub use access::access_policy_middleware;
pub use logging::logging_middleware;
