//! Location Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;

use super::{map_insert_error, order_and_page};
use crate::domain::{
    Location, LocationFilter, LocationRepository, LocationSortField, Page, PageRequest,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct LocationRow {
    location_code: String,
    location_name: String,
    location_address: String,
}

impl LocationRow {
    fn into_location(self) -> Location {
        Location {
            location_code: self.location_code,
            location_name: self.location_name,
            location_address: self.location_address,
        }
    }
}

const COLUMNS: &str = "location_code, location_name, location_address";

const FILTER: &str = r#"
    WHERE ($1::text IS NULL OR LOWER(location_code) = LOWER($1))
      AND ($2::text IS NULL OR LOWER(location_name) LIKE '%' || LOWER($2) || '%')
      AND ($3::text IS NULL OR LOWER(location_address) LIKE '%' || LOWER($3) || '%')
"#;

/// PostgreSQL location repository implementation.
#[derive(Clone)]
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Location>, AppError> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {} FROM location WHERE location_code = $1",
            COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LocationRow::into_location))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM location WHERE location_code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_page(
        &self,
        filter: &LocationFilter,
        page: &PageRequest<LocationSortField>,
    ) -> Result<Page<Location>, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM location {}", FILTER))
                .bind(filter.location_code.as_deref())
                .bind(filter.location_name.as_deref())
                .bind(filter.location_address.as_deref())
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            "SELECT {} FROM location {} {}",
            COLUMNS,
            FILTER,
            order_and_page(page, "location_code", 4)
        );
        let rows = sqlx::query_as::<_, LocationRow>(&sql)
            .bind(filter.location_code.as_deref())
            .bind(filter.location_name.as_deref())
            .bind(filter.location_address.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(LocationRow::into_location).collect(),
            page,
            total,
        ))
    }

    async fn create(&self, location: &Location) -> Result<Location, AppError> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
            INSERT INTO location ({0})
            VALUES ($1, $2, $3)
            RETURNING {0}
            "#,
            COLUMNS
        ))
        .bind(&location.location_code)
        .bind(&location.location_name)
        .bind(&location.location_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(e, || {
                format!(
                    "Location with code {} already exists.",
                    location.location_code
                )
            })
        })?;

        Ok(row.into_location())
    }

    async fn update(&self, location: &Location) -> Result<Location, AppError> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
            UPDATE location SET location_name = $2, location_address = $3
            WHERE location_code = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&location.location_code)
        .bind(&location.location_name)
        .bind(&location.location_address)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Location not found with code: {}",
                location.location_code
            ))
        })?;

        Ok(row.into_location())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM location WHERE location_code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
