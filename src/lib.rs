//! # HR Admin Library
//!
//! HR administration backend with:
//! - RESTful HTTP API for tiers, locations, departments and employees
//! - Salary analytics reports
//! - JWT bearer authentication
//! - An audit log of every API call, persisted by a background worker pool
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, list filters and repository traits
//! - **Application Layer**: Services and DTOs
//! - **Infrastructure Layer**: PostgreSQL repositories, audit workers, fixtures, metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! hr_admin/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, audit queue, fixtures, metrics
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Common utilities (errors, validation, passwords)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core records and contracts
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
