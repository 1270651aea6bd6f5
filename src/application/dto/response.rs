//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::services::LoginResult;
use crate::domain::Employee;

/// Employee as returned to clients. The password hash is never exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub employee_number: String,
    pub employee_name: String,
    pub tier_code: String,
    pub location_code: String,
    pub department_code: String,
    pub supervisor_code: Option<String>,
    pub salary: Option<Decimal>,
    pub entry_date: Option<NaiveDateTime>,
    pub email: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            employee_number: employee.employee_number,
            employee_name: employee.employee_name,
            tier_code: employee.tier_code,
            location_code: employee.location_code,
            department_code: employee.department_code,
            supervisor_code: employee.supervisor_code,
            salary: employee.salary,
            entry_date: employee.entry_date,
            email: employee.email,
        }
    }
}

/// Successful login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub employee_number: String,
    pub employee_name: String,
    pub email: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            employee_number: result.employee_number,
            employee_name: result.employee_name,
            email: result.email,
        }
    }
}

/// `{"message": ...}` body used by delete and logout
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
