//! Department Service

use std::sync::Arc;

use async_trait::async_trait;

use super::{require_code, ServiceError};
use crate::domain::{
    Department, DepartmentFilter, DepartmentRepository, DepartmentSortField, Page, PageRequest,
};

/// Department service trait
#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn list_departments(
        &self,
        filter: DepartmentFilter,
        page: PageRequest<DepartmentSortField>,
    ) -> Result<Page<Department>, ServiceError>;

    async fn get_department(&self, department_code: &str) -> Result<Department, ServiceError>;

    async fn create_department(&self, input: DepartmentInput) -> Result<Department, ServiceError>;

    async fn update_department(&self, input: DepartmentInput) -> Result<Department, ServiceError>;

    async fn delete_department(&self, department_code: &str) -> Result<String, ServiceError>;
}

/// Create/update payload
#[derive(Debug, Clone, Default)]
pub struct DepartmentInput {
    pub department_code: Option<String>,
    pub department_name: String,
}

/// DepartmentService implementation
pub struct DepartmentServiceImpl<R>
where
    R: DepartmentRepository + ?Sized,
{
    department_repo: Arc<R>,
}

impl<R> DepartmentServiceImpl<R>
where
    R: DepartmentRepository + ?Sized,
{
    pub fn new(department_repo: Arc<R>) -> Self {
        Self { department_repo }
    }
}

fn not_found(department_code: &str) -> ServiceError {
    ServiceError::NotFound(format!(
        "Department not found with code: {}",
        department_code
    ))
}

#[async_trait]
impl<R> DepartmentService for DepartmentServiceImpl<R>
where
    R: DepartmentRepository + ?Sized + 'static,
{
    async fn list_departments(
        &self,
        filter: DepartmentFilter,
        page: PageRequest<DepartmentSortField>,
    ) -> Result<Page<Department>, ServiceError> {
        Ok(self.department_repo.find_page(&filter, &page).await?)
    }

    async fn get_department(&self, department_code: &str) -> Result<Department, ServiceError> {
        self.department_repo
            .find_by_code(department_code)
            .await?
            .ok_or_else(|| not_found(department_code))
    }

    async fn create_department(&self, input: DepartmentInput) -> Result<Department, ServiceError> {
        let department_code = require_code(input.department_code, "Department")?;

        if self.department_repo.exists(&department_code).await? {
            return Err(ServiceError::AlreadyExists(format!(
                "Department with code {} already exists.",
                department_code
            )));
        }

        let department = Department {
            department_code,
            department_name: input.department_name,
        };
        let created = self.department_repo.create(&department).await?;
        tracing::info!(department_code = %created.department_code, "Department created");

        Ok(created)
    }

    async fn update_department(&self, input: DepartmentInput) -> Result<Department, ServiceError> {
        let department_code = require_code(input.department_code, "Department")?;

        if !self.department_repo.exists(&department_code).await? {
            return Err(not_found(&department_code));
        }

        let department = Department {
            department_code,
            department_name: input.department_name,
        };
        Ok(self.department_repo.update(&department).await?)
    }

    async fn delete_department(&self, department_code: &str) -> Result<String, ServiceError> {
        if !self.department_repo.delete(department_code).await? {
            return Err(not_found(department_code));
        }

        tracing::info!(department_code = %department_code, "Department deleted");
        Ok(format!(
            "Department with code {} deleted successfully.",
            department_code
        ))
    }
}
