//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    page_request, DateRangeQuery, DepartmentListParams, DepartmentRequest, EmployeeListParams,
    EmployeeRequest, EndpointQuery, HistoryParams, LocationListParams, LocationRequest,
    LoginRequest, TierListParams, TierRequest,
};
pub use response::{EmployeeResponse, LoginResponse, MessageResponse};
