//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod department;
pub mod employee;
pub mod health;
pub mod location;
pub mod logging;
pub mod tier;
