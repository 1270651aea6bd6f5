//! Employee Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::{
    EmployeeListParams, EmployeeRequest, EmployeeResponse, MessageResponse,
};
use crate::application::services::{EmployeeService, EmployeeServiceImpl};
use crate::domain::{
    CumulativeSalary, DepartmentAnalysis, EmployeeRanking, EmployeeRepository, Page,
};
use crate::presentation::http::extractors::{QueryParams, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn service(state: &AppState) -> EmployeeServiceImpl<dyn EmployeeRepository> {
    EmployeeServiceImpl::new(state.repos.employees.clone())
}

/// List employees with filters and paging
pub async fn list_employees(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<EmployeeListParams>,
) -> Result<Json<Page<EmployeeResponse>>, AppError> {
    let page = params.page_request()?;
    let employees = service(&state)
        .list_employees(params.filter(), page)
        .await?;

    Ok(Json(employees.map(EmployeeResponse::from)))
}

/// Get employee by employee number
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_number): Path<String>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = service(&state).get_employee(&employee_number).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = service(&state).create_employee(body.into()).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Overwrite an employee. An empty password keeps the stored one.
pub async fn update_employee(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = service(&state).update_employee(body.into()).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_number): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = service(&state).delete_employee(&employee_number).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// Running salary total per department
pub async fn cumulative_salary(
    State(state): State<AppState>,
) -> Result<Json<Vec<CumulativeSalary>>, AppError> {
    Ok(Json(service(&state).cumulative_salaries().await?))
}

/// Largest department and lowest department average per location
pub async fn department_analysis(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentAnalysis>>, AppError> {
    Ok(Json(service(&state).department_analysis().await?))
}

/// Salary rank within each location and department
pub async fn employee_ranking(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeRanking>>, AppError> {
    Ok(Json(service(&state).salary_ranking().await?))
}
