//! Tier Service
//!
//! Handles tier reference data management.

use std::sync::Arc;

use async_trait::async_trait;

use super::{require_code, ServiceError};
use crate::domain::{Page, PageRequest, Tier, TierFilter, TierRepository, TierSortField};

/// Tier service trait
#[async_trait]
pub trait TierService: Send + Sync {
    /// Filtered, sorted page of tiers
    async fn list_tiers(
        &self,
        filter: TierFilter,
        page: PageRequest<TierSortField>,
    ) -> Result<Page<Tier>, ServiceError>;

    /// Get tier by code
    async fn get_tier(&self, tier_code: &str) -> Result<Tier, ServiceError>;

    /// Create a tier; the code must be present and unused
    async fn create_tier(&self, input: TierInput) -> Result<Tier, ServiceError>;

    /// Overwrite an existing tier
    async fn update_tier(&self, input: TierInput) -> Result<Tier, ServiceError>;

    /// Delete a tier, returning a confirmation message
    async fn delete_tier(&self, tier_code: &str) -> Result<String, ServiceError>;
}

/// Create/update payload
#[derive(Debug, Clone, Default)]
pub struct TierInput {
    pub tier_code: Option<String>,
    pub tier_name: String,
}

/// TierService implementation
pub struct TierServiceImpl<R>
where
    R: TierRepository + ?Sized,
{
    tier_repo: Arc<R>,
}

impl<R> TierServiceImpl<R>
where
    R: TierRepository + ?Sized,
{
    pub fn new(tier_repo: Arc<R>) -> Self {
        Self { tier_repo }
    }
}

#[async_trait]
impl<R> TierService for TierServiceImpl<R>
where
    R: TierRepository + ?Sized + 'static,
{
    async fn list_tiers(
        &self,
        filter: TierFilter,
        page: PageRequest<TierSortField>,
    ) -> Result<Page<Tier>, ServiceError> {
        Ok(self.tier_repo.find_page(&filter, &page).await?)
    }

    async fn get_tier(&self, tier_code: &str) -> Result<Tier, ServiceError> {
        self.tier_repo
            .find_by_code(tier_code)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Tier not found with code: {}", tier_code)))
    }

    async fn create_tier(&self, input: TierInput) -> Result<Tier, ServiceError> {
        let tier_code = require_code(input.tier_code, "Tier")?;

        if self.tier_repo.exists(&tier_code).await? {
            return Err(ServiceError::AlreadyExists(format!(
                "Tier with code {} already exists.",
                tier_code
            )));
        }

        let tier = Tier {
            tier_code,
            tier_name: input.tier_name,
        };
        let created = self.tier_repo.create(&tier).await?;
        tracing::info!(tier_code = %created.tier_code, "Tier created");

        Ok(created)
    }

    async fn update_tier(&self, input: TierInput) -> Result<Tier, ServiceError> {
        let tier_code = require_code(input.tier_code, "Tier")?;

        if !self.tier_repo.exists(&tier_code).await? {
            return Err(ServiceError::NotFound(format!(
                "Tier not found with code: {}",
                tier_code
            )));
        }

        let tier = Tier {
            tier_code,
            tier_name: input.tier_name,
        };
        Ok(self.tier_repo.update(&tier).await?)
    }

    async fn delete_tier(&self, tier_code: &str) -> Result<String, ServiceError> {
        if !self.tier_repo.delete(tier_code).await? {
            return Err(ServiceError::NotFound(format!(
                "Tier not found with code: {}",
                tier_code
            )));
        }

        tracing::info!(tier_code = %tier_code, "Tier deleted");
        Ok(format!("Tier with code {} deleted successfully.", tier_code))
    }
}
