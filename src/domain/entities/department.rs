//! Department entity and repository trait.
//!
//! Maps to the `department` table:
//! - department_code: VARCHAR(5) PRIMARY KEY
//! - department_name: VARCHAR(200) NOT NULL

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{contains_ignore_case, Page, PageRequest, SortField};
use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_code: String,
    pub department_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentFilter {
    pub department_code: Option<String>,
    pub department_name: Option<String>,
}

impl DepartmentFilter {
    pub fn matches(&self, department: &Department) -> bool {
        self.department_code
            .as_deref()
            .map_or(true, |c| department.department_code.eq_ignore_ascii_case(c))
            && self
                .department_name
                .as_deref()
                .map_or(true, |n| contains_ignore_case(&department.department_name, n))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartmentSortField {
    DepartmentCode,
    #[default]
    DepartmentName,
}

impl SortField for DepartmentSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "departmentCode" | "department_code" => Some(Self::DepartmentCode),
            "departmentName" | "department_name" => Some(Self::DepartmentName),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::DepartmentCode => "department_code",
            Self::DepartmentName => "department_name",
        }
    }
}

/// Repository trait for Department data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Department>, AppError>;

    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    async fn find_page(
        &self,
        filter: &DepartmentFilter,
        page: &PageRequest<DepartmentSortField>,
    ) -> Result<Page<Department>, AppError>;

    async fn create(&self, department: &Department) -> Result<Department, AppError>;

    async fn update(&self, department: &Department) -> Result<Department, AppError>;

    /// Delete by code. Returns false when nothing was deleted.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;
}
