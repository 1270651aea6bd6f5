//! # Domain Entities
//!
//! Records of the HR backend. All entities map directly to their database tables
//! and are keyed by natural string codes, except the audit log which uses a UUID.
//!
//! ## Reference Data
//!
//! - **Tier**: job grade
//! - **Location**: office location
//! - **Department**: organisational unit
//!
//! ## Transactional Data
//!
//! - **Employee**: references one tier, location and department
//! - **ApiCallRecord**: append-only audit row, one per API request
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer.

mod api_call;
mod department;
mod employee;
mod location;
mod tier;

pub use api_call::{ApiCallFilter, ApiCallRecord, ApiCallRepository, ApiCallSortField};
pub use department::{Department, DepartmentFilter, DepartmentRepository, DepartmentSortField};
pub use employee::{
    CumulativeSalary, DepartmentAnalysis, Employee, EmployeeFilter, EmployeeRanking,
    EmployeeRepository, EmployeeSortField,
};
pub use location::{Location, LocationFilter, LocationRepository, LocationSortField};
pub use tier::{Tier, TierFilter, TierRepository, TierSortField};

#[cfg(test)]
pub use api_call::MockApiCallRepository;
#[cfg(test)]
pub use department::MockDepartmentRepository;
#[cfg(test)]
pub use employee::MockEmployeeRepository;
#[cfg(test)]
pub use location::MockLocationRepository;
#[cfg(test)]
pub use tier::MockTierRepository;
