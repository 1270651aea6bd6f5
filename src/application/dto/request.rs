//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::application::services::{DepartmentInput, EmployeeInput, LocationInput, TierInput};
use crate::domain::{
    ApiCallSortField, DepartmentFilter, DepartmentSortField, EmployeeFilter, EmployeeSortField,
    LocationFilter, LocationSortField, PageRequest, SortDirection, SortField, TierFilter,
    TierSortField, MAX_PAGE_SIZE,
};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create/update tier request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TierRequest {
    #[validate(length(max = 5, message = "Tier code must be at most 5 characters"))]
    pub tier_code: Option<String>,

    #[validate(length(max = 200, message = "Tier name must be at most 200 characters"))]
    pub tier_name: String,
}

impl From<TierRequest> for TierInput {
    fn from(req: TierRequest) -> Self {
        Self {
            tier_code: req.tier_code,
            tier_name: req.tier_name,
        }
    }
}

/// Create/update location request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    #[validate(length(max = 5, message = "Location code must be at most 5 characters"))]
    pub location_code: Option<String>,

    #[validate(length(max = 200, message = "Location name must be at most 200 characters"))]
    pub location_name: String,

    #[validate(length(max = 300, message = "Location address must be at most 300 characters"))]
    pub location_address: String,
}

impl From<LocationRequest> for LocationInput {
    fn from(req: LocationRequest) -> Self {
        Self {
            location_code: req.location_code,
            location_name: req.location_name,
            location_address: req.location_address,
        }
    }
}

/// Create/update department request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    #[validate(length(max = 5, message = "Department code must be at most 5 characters"))]
    pub department_code: Option<String>,

    #[validate(length(max = 200, message = "Department name must be at most 200 characters"))]
    pub department_name: String,
}

impl From<DepartmentRequest> for DepartmentInput {
    fn from(req: DepartmentRequest) -> Self {
        Self {
            department_code: req.department_code,
            department_name: req.department_name,
        }
    }
}

/// Create/update employee request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[validate(length(max = 50, message = "Employee number must be at most 50 characters"))]
    pub employee_number: Option<String>,

    #[validate(length(max = 200, message = "Employee name must be at most 200 characters"))]
    pub employee_name: String,

    pub tier_code: String,
    pub location_code: String,
    pub department_code: String,
    pub supervisor_code: Option<String>,
    pub salary: Option<Decimal>,
    pub entry_date: Option<NaiveDateTime>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: Option<String>,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(req: EmployeeRequest) -> Self {
        Self {
            employee_number: req.employee_number,
            employee_name: req.employee_name,
            tier_code: req.tier_code,
            location_code: req.location_code,
            department_code: req.department_code,
            supervisor_code: req.supervisor_code,
            salary: req.salary,
            entry_date: req.entry_date,
            email: req.email,
            password: req.password,
        }
    }
}

fn default_page_size() -> i64 {
    10
}

fn default_history_size() -> i64 {
    20
}

/// Blank query values count as absent.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Build a validated page request. Page bounds are checked by the DTO's
/// `Validate` impl; this resolves the sort field.
pub fn page_request<F>(
    page_number: i64,
    page_size: i64,
    sort_by: Option<&str>,
    direction: SortDirection,
) -> Result<PageRequest<F>, AppError>
where
    F: SortField + Default,
{
    let page_number = u32::try_from(page_number)
        .map_err(|_| AppError::Validation("pageNumber must be zero or greater".into()))?;
    let page_size = u32::try_from(page_size)
        .ok()
        .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
        .ok_or_else(|| {
            AppError::Validation(format!("pageSize must be between 1 and {}", MAX_PAGE_SIZE))
        })?;

    let sort_by = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => F::parse(name)
            .ok_or_else(|| AppError::Validation(format!("Invalid sort field: {}", name)))?,
        None => F::default(),
    };

    Ok(PageRequest::new(page_number, page_size, sort_by, direction))
}

macro_rules! list_params {
    (
        $(#[$meta:meta])*
        $name:ident, $filter:ident, $sort:ident { $($field:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Deserialize, Validate)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            #[validate(range(min = 0, message = "must be zero or greater"))]
            pub page_number: i64,

            #[validate(range(min = 1, max = 1000, message = "must be between 1 and 1000"))]
            pub page_size: i64,

            pub sort_by: Option<String>,

            $(pub $field: Option<String>,)*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    page_number: 0,
                    page_size: default_page_size(),
                    sort_by: None,
                    $($field: None,)*
                }
            }
        }

        impl $name {
            pub fn filter(&self) -> $filter {
                $filter {
                    $($field: non_blank(&self.$field),)*
                }
            }

            /// Ascending page request, after bounds validation.
            pub fn page_request(&self) -> Result<PageRequest<$sort>, AppError> {
                self.validate().map_err(validation_error)?;
                page_request(
                    self.page_number,
                    self.page_size,
                    self.sort_by.as_deref(),
                    SortDirection::Asc,
                )
            }
        }
    };
}

list_params!(
    /// `GET /api/tier` query string
    TierListParams, TierFilter, TierSortField { tier_code, tier_name }
);

list_params!(
    /// `GET /api/location` query string
    LocationListParams, LocationFilter, LocationSortField {
        location_code,
        location_name,
        location_address,
    }
);

list_params!(
    /// `GET /api/department` query string
    DepartmentListParams, DepartmentFilter, DepartmentSortField {
        department_code,
        department_name,
    }
);

list_params!(
    /// `GET /api/employee` query string
    EmployeeListParams, EmployeeFilter, EmployeeSortField {
        employee_number,
        employee_name,
        employee_email,
    }
);

/// Audit history paging (`page`, `size`, `sortBy`, `sortDir`)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryParams {
    #[validate(range(min = 0, message = "must be zero or greater"))]
    pub page: i64,

    #[validate(range(min = 1, max = 1000, message = "must be between 1 and 1000"))]
    pub size: i64,

    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_history_size(),
            sort_by: None,
            sort_dir: None,
        }
    }
}

impl HistoryParams {
    /// Defaults to newest first.
    pub fn page_request(&self) -> Result<PageRequest<ApiCallSortField>, AppError> {
        self.validate().map_err(validation_error)?;
        let direction = self
            .sort_dir
            .as_deref()
            .map_or(SortDirection::Desc, SortDirection::parse);
        page_request(self.page, self.size, self.sort_by.as_deref(), direction)
    }
}

/// `?endpoint=` selector
#[derive(Debug, Deserialize)]
pub struct EndpointQuery {
    pub endpoint: String,
}

/// `?startDate=&endDate=` selector, RFC 3339 timestamps
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
