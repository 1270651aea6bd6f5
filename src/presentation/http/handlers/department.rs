//! Department Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::{MessageResponse, DepartmentListParams, DepartmentRequest};
use crate::application::services::{DepartmentService, DepartmentServiceImpl};
use crate::domain::{Page, Department, DepartmentRepository};
use crate::presentation::http::extractors::{QueryParams, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn service(state: &AppState) -> DepartmentServiceImpl<dyn DepartmentRepository> {
    DepartmentServiceImpl::new(state.repos.departments.clone())
}

pub async fn list_departments(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<DepartmentListParams>,
) -> Result<Json<Page<Department>>, AppError> {
    let page = params.page_request()?;
    let result = service(&state).list_departments(params.filter(), page).await?;
    Ok(Json(result))
}

pub async fn get_department(
    State(state): State<AppState>,
    Path(department_code): Path<String>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(service(&state).get_department(&department_code).await?))
}

pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<DepartmentRequest>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(service(&state).create_department(body.into()).await?))
}

pub async fn update_department(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<DepartmentRequest>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(service(&state).update_department(body.into()).await?))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Path(department_code): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = service(&state).delete_department(&department_code).await?;
    Ok(Json(MessageResponse::new(message)))
}
