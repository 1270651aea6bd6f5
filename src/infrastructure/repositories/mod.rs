//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgTierRepository** - Job grades
//! - **PgLocationRepository** - Office locations
//! - **PgDepartmentRepository** - Organisational units
//! - **PgEmployeeRepository** - Employees and the salary reports
//! - **PgApiCallRepository** - Append-only audit log
//!
//! List queries bind every optional filter as `($n::text IS NULL OR ...)`, so
//! each entity needs a single parameterized statement. The ORDER BY column
//! comes from a `SortField` whitelist and is the only interpolated text.

pub mod api_call_repository;
pub mod department_repository;
pub mod employee_repository;
pub mod location_repository;
pub mod tier_repository;

pub use api_call_repository::PgApiCallRepository;
pub use department_repository::PgDepartmentRepository;
pub use employee_repository::PgEmployeeRepository;
pub use location_repository::PgLocationRepository;
pub use tier_repository::PgTierRepository;

use crate::domain::{PageRequest, SortField};
use crate::shared::error::AppError;

/// Map a failed INSERT, turning primary-key collisions into `AlreadyExists`.
pub(crate) fn map_insert_error(e: sqlx::Error, conflict: impl FnOnce() -> String) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::AlreadyExists(conflict())
        }
        _ => AppError::Database(e),
    }
}

/// `ORDER BY <col> <dir>, <key> ASC LIMIT $a OFFSET $b`
///
/// The key column keeps paging stable when the sort column has duplicates.
pub(crate) fn order_and_page<F: SortField>(
    page: &PageRequest<F>,
    key_column: &str,
    first_param: usize,
) -> String {
    format!(
        "ORDER BY {} {}, {} ASC LIMIT ${} OFFSET ${}",
        page.sort_by.column(),
        page.direction.as_sql(),
        key_column,
        first_param,
        first_param + 1
    )
}
