//! # Domain Layer
//!
//! The domain layer contains the core records of the HR backend.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Tier, Location, Department, Employee and ApiCallRecord,
//!   each with its list filter, sort fields and repository trait
//! - **value_objects**: Pagination and sorting types
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
