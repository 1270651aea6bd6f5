//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Employee login and JWT issuing/validation
//! - **TierService / LocationService / DepartmentService**: Reference data CRUD
//! - **EmployeeService**: Employee CRUD and salary analytics
//! - **ApiCallHistoryService**: Audit log queries

pub mod audit_service;
pub mod auth_service;
pub mod department_service;
pub mod employee_service;
pub mod location_service;
pub mod tier_service;

use crate::shared::error::AppError;

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Claims, LoginResult, TokenIssuer};

// Re-export reference data service types
pub use department_service::{DepartmentInput, DepartmentService, DepartmentServiceImpl};
pub use location_service::{LocationInput, LocationService, LocationServiceImpl};
pub use tier_service::{TierInput, TierService, TierServiceImpl};

// Re-export employee service types
pub use employee_service::{EmployeeInput, EmployeeService, EmployeeServiceImpl};

// Re-export audit service types
pub use audit_service::{ApiCallHistoryService, ApiCallHistoryServiceImpl};

/// Errors shared by the CRUD services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound(msg) => ServiceError::NotFound(msg),
            AppError::AlreadyExists(msg) => ServiceError::AlreadyExists(msg),
            e => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::AlreadyExists(msg) => AppError::AlreadyExists(msg),
            ServiceError::InvalidData(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Credential and token failures are 401 carrying the error message.
impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Internal(msg) => AppError::Internal(msg),
            e => AppError::Unauthorized(e.to_string()),
        }
    }
}

/// Trimmed key, or the "cannot be null or empty" error for `entity`.
pub(crate) fn require_code(code: Option<String>, entity: &str) -> Result<String, ServiceError> {
    match code.map(|c| c.trim().to_string()) {
        Some(c) if !c.is_empty() => Ok(c),
        _ => Err(ServiceError::InvalidData(format!(
            "{} code cannot be null or empty.",
            entity
        ))),
    }
}
