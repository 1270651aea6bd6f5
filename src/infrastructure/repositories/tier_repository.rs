//! Tier Repository Implementation

use async_trait::async_trait;
use sqlx::PgPool;

use super::{map_insert_error, order_and_page};
use crate::domain::{Page, PageRequest, Tier, TierFilter, TierRepository, TierSortField};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct TierRow {
    tier_code: String,
    tier_name: String,
}

impl TierRow {
    fn into_tier(self) -> Tier {
        Tier {
            tier_code: self.tier_code,
            tier_name: self.tier_name,
        }
    }
}

const FILTER: &str = r#"
    WHERE ($1::text IS NULL OR LOWER(tier_code) = LOWER($1))
      AND ($2::text IS NULL OR LOWER(tier_name) LIKE '%' || LOWER($2) || '%')
"#;

/// PostgreSQL tier repository implementation.
#[derive(Clone)]
pub struct PgTierRepository {
    pool: PgPool,
}

impl PgTierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TierRepository for PgTierRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Tier>, AppError> {
        let row = sqlx::query_as::<_, TierRow>(
            "SELECT tier_code, tier_name FROM tier WHERE tier_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TierRow::into_tier))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tier WHERE tier_code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_page(
        &self,
        filter: &TierFilter,
        page: &PageRequest<TierSortField>,
    ) -> Result<Page<Tier>, AppError> {
        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM tier {}", FILTER))
            .bind(filter.tier_code.as_deref())
            .bind(filter.tier_name.as_deref())
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT tier_code, tier_name FROM tier {} {}",
            FILTER,
            order_and_page(page, "tier_code", 3)
        );
        let rows = sqlx::query_as::<_, TierRow>(&sql)
            .bind(filter.tier_code.as_deref())
            .bind(filter.tier_name.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(TierRow::into_tier).collect(),
            page,
            total,
        ))
    }

    async fn create(&self, tier: &Tier) -> Result<Tier, AppError> {
        let row = sqlx::query_as::<_, TierRow>(
            r#"
            INSERT INTO tier (tier_code, tier_name)
            VALUES ($1, $2)
            RETURNING tier_code, tier_name
            "#,
        )
        .bind(&tier.tier_code)
        .bind(&tier.tier_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(e, || {
                format!("Tier with code {} already exists.", tier.tier_code)
            })
        })?;

        Ok(row.into_tier())
    }

    async fn update(&self, tier: &Tier) -> Result<Tier, AppError> {
        let row = sqlx::query_as::<_, TierRow>(
            r#"
            UPDATE tier SET tier_name = $2
            WHERE tier_code = $1
            RETURNING tier_code, tier_name
            "#,
        )
        .bind(&tier.tier_code)
        .bind(&tier.tier_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tier not found with code: {}", tier.tier_code)))?;

        Ok(row.into_tier())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tier WHERE tier_code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
