//! Tier entity and repository trait.
//!
//! Maps to the `tier` table:
//! - tier_code: VARCHAR(5) PRIMARY KEY
//! - tier_name: VARCHAR(200) NOT NULL

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{contains_ignore_case, Page, PageRequest, SortField};
use crate::shared::error::AppError;

/// Job tier (grade) an employee is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub tier_code: String,
    pub tier_name: String,
}

/// List filter. Code matches exactly (ignoring case), name by substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierFilter {
    pub tier_code: Option<String>,
    pub tier_name: Option<String>,
}

impl TierFilter {
    pub fn matches(&self, tier: &Tier) -> bool {
        self.tier_code
            .as_deref()
            .map_or(true, |c| tier.tier_code.eq_ignore_ascii_case(c))
            && self
                .tier_name
                .as_deref()
                .map_or(true, |n| contains_ignore_case(&tier.tier_name, n))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierSortField {
    #[default]
    TierCode,
    TierName,
}

impl SortField for TierSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "tierCode" | "tier_code" => Some(Self::TierCode),
            "tierName" | "tier_name" => Some(Self::TierName),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::TierCode => "tier_code",
            Self::TierName => "tier_name",
        }
    }
}

/// Repository trait for Tier data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TierRepository: Send + Sync {
    /// Find a tier by its code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Tier>, AppError>;

    /// Check whether a tier with this code exists.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Filtered, sorted page of tiers.
    async fn find_page(
        &self,
        filter: &TierFilter,
        page: &PageRequest<TierSortField>,
    ) -> Result<Page<Tier>, AppError>;

    /// Insert a new tier.
    async fn create(&self, tier: &Tier) -> Result<Tier, AppError>;

    /// Overwrite an existing tier.
    async fn update(&self, tier: &Tier) -> Result<Tier, AppError>;

    /// Delete by code. Returns false when nothing was deleted.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;
}
