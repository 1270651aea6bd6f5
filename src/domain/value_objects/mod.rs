//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **PageRequest / Page**: zero-based pagination with totals
//! - **SortField / SortDirection**: whitelisted ordering for list queries

mod pagination;

pub use pagination::*;
