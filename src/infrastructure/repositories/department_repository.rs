//! Department Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;

use super::{map_insert_error, order_and_page};
use crate::domain::{
    Department, DepartmentFilter, DepartmentRepository, DepartmentSortField, Page, PageRequest,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct DepartmentRow {
    department_code: String,
    department_name: String,
}

impl DepartmentRow {
    fn into_department(self) -> Department {
        Department {
            department_code: self.department_code,
            department_name: self.department_name,
        }
    }
}

const FILTER: &str = r#"
    WHERE ($1::text IS NULL OR LOWER(department_code) = LOWER($1))
      AND ($2::text IS NULL OR LOWER(department_name) LIKE '%' || LOWER($2) || '%')
"#;

#[derive(Clone)]
pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Department>, AppError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            "SELECT department_code, department_name FROM department WHERE department_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DepartmentRow::into_department))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM department WHERE department_code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_page(
        &self,
        filter: &DepartmentFilter,
        page: &PageRequest<DepartmentSortField>,
    ) -> Result<Page<Department>, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM department {}", FILTER))
                .bind(filter.department_code.as_deref())
                .bind(filter.department_name.as_deref())
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            "SELECT department_code, department_name FROM department {} {}",
            FILTER,
            order_and_page(page, "department_code", 3)
        );
        let rows = sqlx::query_as::<_, DepartmentRow>(&sql)
            .bind(filter.department_code.as_deref())
            .bind(filter.department_name.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(DepartmentRow::into_department).collect(),
            page,
            total,
        ))
    }

    async fn create(&self, department: &Department) -> Result<Department, AppError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            INSERT INTO department (department_code, department_name)
            VALUES ($1, $2)
            RETURNING department_code, department_name
            "#,
        )
        .bind(&department.department_code)
        .bind(&department.department_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(e, || {
                format!(
                    "Department with code {} already exists.",
                    department.department_code
                )
            })
        })?;

        Ok(row.into_department())
    }

    async fn update(&self, department: &Department) -> Result<Department, AppError> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            UPDATE department SET department_name = $2
            WHERE department_code = $1
            RETURNING department_code, department_name
            "#,
        )
        .bind(&department.department_code)
        .bind(&department.department_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Department not found with code: {}",
                department.department_code
            ))
        })?;

        Ok(row.into_department())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM department WHERE department_code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
