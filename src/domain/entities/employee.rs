//! Employee entity, analytics rows and repository trait.
//!
//! Maps to the `employee` table:
//! - employee_number: VARCHAR(50) PRIMARY KEY
//! - employee_name: VARCHAR(200) NOT NULL
//! - tier_code / location_code / department_code: FK to reference tables
//! - supervisor_code: VARCHAR(50) NULL
//! - salary: NUMERIC(19, 4) NULL
//! - entry_date: TIMESTAMP NULL
//! - email: VARCHAR NOT NULL
//! - password: VARCHAR NOT NULL (Argon2 PHC string)

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_objects::{contains_ignore_case, Page, PageRequest, SortField};
use crate::shared::error::AppError;

/// An employee record.
///
/// Not serializable on purpose: responses go through `EmployeeResponse`,
/// which leaves out the password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub employee_number: String,
    pub employee_name: String,
    pub tier_code: String,
    pub location_code: String,
    pub department_code: String,
    pub supervisor_code: Option<String>,
    pub salary: Option<Decimal>,
    pub entry_date: Option<NaiveDateTime>,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub employee_number: Option<String>,
    pub employee_name: Option<String>,
    pub employee_email: Option<String>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        self.employee_number
            .as_deref()
            .map_or(true, |n| employee.employee_number.eq_ignore_ascii_case(n))
            && self
                .employee_name
                .as_deref()
                .map_or(true, |n| contains_ignore_case(&employee.employee_name, n))
            && self
                .employee_email
                .as_deref()
                .map_or(true, |e| contains_ignore_case(&employee.email, e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeSortField {
    #[default]
    EmployeeNumber,
    EmployeeName,
    TierCode,
    LocationCode,
    DepartmentCode,
    SupervisorCode,
    Salary,
    EntryDate,
    Email,
}

impl SortField for EmployeeSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "employeeNumber" | "employee_number" => Some(Self::EmployeeNumber),
            "employeeName" | "employee_name" => Some(Self::EmployeeName),
            "tierCode" | "tier_code" => Some(Self::TierCode),
            "locationCode" | "location_code" => Some(Self::LocationCode),
            "departmentCode" | "department_code" => Some(Self::DepartmentCode),
            "supervisorCode" | "supervisor_code" => Some(Self::SupervisorCode),
            "salary" => Some(Self::Salary),
            "entryDate" | "entry_date" => Some(Self::EntryDate),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::EmployeeNumber => "employee_number",
            Self::EmployeeName => "employee_name",
            Self::TierCode => "tier_code",
            Self::LocationCode => "location_code",
            Self::DepartmentCode => "department_code",
            Self::SupervisorCode => "supervisor_code",
            Self::Salary => "salary",
            Self::EntryDate => "entry_date",
            Self::Email => "email",
        }
    }
}

/// Running salary total per department, in employee-number order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSalary {
    pub department_code: String,
    pub employee_number: String,
    pub employee_name: String,
    pub cumulative_salary: Option<Decimal>,
}

/// Per-location summary: the largest department and the lowest department average salary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAnalysis {
    pub location_name: String,
    pub dept_with_most_employee: String,
    pub dept_employee_count: i64,
    pub lowest_dept_avg_salary: Option<Decimal>,
}

/// Dense salary rank within a (location, department) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRanking {
    pub location_name: String,
    pub department_name: String,
    pub employee_name: String,
    /// Tier name of the employee
    pub position: String,
    pub salary: Option<Decimal>,
    pub rank: i64,
    /// Salary of the next-higher rank minus this salary; zero at the top
    pub salary_gap: Decimal,
}

/// Repository trait for Employee data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_number(&self, employee_number: &str) -> Result<Option<Employee>, AppError>;

    /// Used by login. Emails are not unique in the schema; the first match wins.
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError>;

    async fn exists(&self, employee_number: &str) -> Result<bool, AppError>;

    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest<EmployeeSortField>,
    ) -> Result<Page<Employee>, AppError>;

    async fn create(&self, employee: &Employee) -> Result<Employee, AppError>;

    async fn update(&self, employee: &Employee) -> Result<Employee, AppError>;

    /// Delete by number. Returns false when nothing was deleted.
    async fn delete(&self, employee_number: &str) -> Result<bool, AppError>;

    async fn cumulative_salaries(&self) -> Result<Vec<CumulativeSalary>, AppError>;

    async fn department_analysis(&self) -> Result<Vec<DepartmentAnalysis>, AppError>;

    async fn salary_ranking(&self) -> Result<Vec<EmployeeRanking>, AppError>;
}
