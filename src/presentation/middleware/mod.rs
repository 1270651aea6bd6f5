//! Middleware
//!
//! Tower middleware for request processing.

pub mod audit;
pub mod auth;
pub mod cors;
pub mod logging;
pub mod metrics;

pub use audit::audit_middleware;
pub use auth::{auth_middleware, AuthUser};
pub use metrics::track_metrics;
