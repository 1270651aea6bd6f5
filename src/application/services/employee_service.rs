//! Employee Service
//!
//! Employee CRUD plus the three salary analytics reports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::ServiceError;
use crate::domain::{
    CumulativeSalary, DepartmentAnalysis, Employee, EmployeeFilter, EmployeeRanking,
    EmployeeRepository, EmployeeSortField, Page, PageRequest,
};
use crate::shared::password::hash_password;
use crate::shared::validation::is_blank;

/// Employee service trait
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn list_employees(
        &self,
        filter: EmployeeFilter,
        page: PageRequest<EmployeeSortField>,
    ) -> Result<Page<Employee>, ServiceError>;

    async fn get_employee(&self, employee_number: &str) -> Result<Employee, ServiceError>;

    /// Create an employee. The password is required and stored hashed.
    async fn create_employee(&self, input: EmployeeInput) -> Result<Employee, ServiceError>;

    /// Overwrite an employee. A blank password keeps the stored hash.
    async fn update_employee(&self, input: EmployeeInput) -> Result<Employee, ServiceError>;

    async fn delete_employee(&self, employee_number: &str) -> Result<String, ServiceError>;

    async fn cumulative_salaries(&self) -> Result<Vec<CumulativeSalary>, ServiceError>;

    async fn department_analysis(&self) -> Result<Vec<DepartmentAnalysis>, ServiceError>;

    async fn salary_ranking(&self) -> Result<Vec<EmployeeRanking>, ServiceError>;
}

/// Create/update payload
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub employee_number: Option<String>,
    pub employee_name: String,
    pub tier_code: String,
    pub location_code: String,
    pub department_code: String,
    pub supervisor_code: Option<String>,
    pub salary: Option<Decimal>,
    pub entry_date: Option<NaiveDateTime>,
    pub email: String,
    pub password: Option<String>,
}

impl EmployeeInput {
    fn into_employee(self, employee_number: String, password_hash: String) -> Employee {
        Employee {
            employee_number,
            employee_name: self.employee_name,
            tier_code: self.tier_code,
            location_code: self.location_code,
            department_code: self.department_code,
            supervisor_code: self.supervisor_code.filter(|s| !s.trim().is_empty()),
            salary: self.salary,
            entry_date: self.entry_date,
            email: self.email,
            password_hash,
        }
    }
}

/// EmployeeService implementation
pub struct EmployeeServiceImpl<R>
where
    R: EmployeeRepository + ?Sized,
{
    employee_repo: Arc<R>,
}

impl<R> EmployeeServiceImpl<R>
where
    R: EmployeeRepository + ?Sized,
{
    pub fn new(employee_repo: Arc<R>) -> Self {
        Self { employee_repo }
    }
}

fn not_found(employee_number: &str) -> ServiceError {
    ServiceError::NotFound(format!(
        "Employee not found with employee number: {}",
        employee_number
    ))
}

fn require_number(employee_number: Option<String>) -> Result<String, ServiceError> {
    match employee_number.map(|n| n.trim().to_string()) {
        Some(n) if !n.is_empty() => Ok(n),
        _ => Err(ServiceError::InvalidData(
            "Employee number cannot be null or empty.".into(),
        )),
    }
}

fn hash(password: &str) -> Result<String, ServiceError> {
    hash_password(password).map_err(|e| ServiceError::Internal(e.to_string()))
}

#[async_trait]
impl<R> EmployeeService for EmployeeServiceImpl<R>
where
    R: EmployeeRepository + ?Sized + 'static,
{
    async fn list_employees(
        &self,
        filter: EmployeeFilter,
        page: PageRequest<EmployeeSortField>,
    ) -> Result<Page<Employee>, ServiceError> {
        Ok(self.employee_repo.find_page(&filter, &page).await?)
    }

    async fn get_employee(&self, employee_number: &str) -> Result<Employee, ServiceError> {
        self.employee_repo
            .find_by_number(employee_number)
            .await?
            .ok_or_else(|| not_found(employee_number))
    }

    async fn create_employee(&self, mut input: EmployeeInput) -> Result<Employee, ServiceError> {
        let employee_number = require_number(input.employee_number.take())?;

        let password = match input.password.take() {
            Some(p) if !is_blank(Some(&p)) => p,
            _ => {
                return Err(ServiceError::InvalidData(
                    "Employee password cannot be null or empty.".into(),
                ))
            }
        };

        if self.employee_repo.exists(&employee_number).await? {
            return Err(ServiceError::AlreadyExists(format!(
                "Employee with employee number {} already exists.",
                employee_number
            )));
        }

        let employee = input.into_employee(employee_number, hash(&password)?);
        let created = self.employee_repo.create(&employee).await?;
        tracing::info!(employee_number = %created.employee_number, "Employee created");

        Ok(created)
    }

    async fn update_employee(&self, mut input: EmployeeInput) -> Result<Employee, ServiceError> {
        let employee_number = require_number(input.employee_number.take())?;

        let existing = self
            .employee_repo
            .find_by_number(&employee_number)
            .await?
            .ok_or_else(|| not_found(&employee_number))?;

        let password_hash = match input.password.take() {
            Some(p) if !is_blank(Some(&p)) => hash(&p)?,
            _ => existing.password_hash,
        };

        let employee = input.into_employee(employee_number, password_hash);
        Ok(self.employee_repo.update(&employee).await?)
    }

    async fn delete_employee(&self, employee_number: &str) -> Result<String, ServiceError> {
        if !self.employee_repo.delete(employee_number).await? {
            return Err(not_found(employee_number));
        }

        tracing::info!(employee_number = %employee_number, "Employee deleted");
        Ok(format!(
            "Employee with code {} deleted successfully.",
            employee_number
        ))
    }

    async fn cumulative_salaries(&self) -> Result<Vec<CumulativeSalary>, ServiceError> {
        self.employee_repo.cumulative_salaries().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to retrieve employee cumulative salaries");
            e.into()
        })
    }

    async fn department_analysis(&self) -> Result<Vec<DepartmentAnalysis>, ServiceError> {
        self.employee_repo.department_analysis().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to retrieve employee department analysis");
            e.into()
        })
    }

    async fn salary_ranking(&self) -> Result<Vec<EmployeeRanking>, ServiceError> {
        Ok(self.employee_repo.salary_ranking().await?)
    }
}
