//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database pool and migrations (PostgreSQL)
//! - Repositories for every domain entity
//! - The audit worker pool
//! - CSV fixture loading
//! - Prometheus metrics

pub mod audit;
pub mod database;
pub mod fixtures;
pub mod metrics;
pub mod repositories;
