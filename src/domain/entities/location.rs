//! Location entity and repository trait.
//!
//! Maps to the `location` table:
//! - location_code: VARCHAR(5) PRIMARY KEY
//! - location_name: VARCHAR(200) NOT NULL
//! - location_address: VARCHAR(300) NOT NULL

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{contains_ignore_case, Page, PageRequest, SortField};
use crate::shared::error::AppError;

/// Office location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_code: String,
    pub location_name: String,
    pub location_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    pub location_code: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
}

impl LocationFilter {
    pub fn matches(&self, location: &Location) -> bool {
        self.location_code
            .as_deref()
            .map_or(true, |c| location.location_code.eq_ignore_ascii_case(c))
            && self
                .location_name
                .as_deref()
                .map_or(true, |n| contains_ignore_case(&location.location_name, n))
            && self
                .location_address
                .as_deref()
                .map_or(true, |a| contains_ignore_case(&location.location_address, a))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationSortField {
    LocationCode,
    #[default]
    LocationName,
    LocationAddress,
}

impl SortField for LocationSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "locationCode" | "location_code" => Some(Self::LocationCode),
            "locationName" | "location_name" => Some(Self::LocationName),
            "locationAddress" | "location_address" => Some(Self::LocationAddress),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::LocationCode => "location_code",
            Self::LocationName => "location_name",
            Self::LocationAddress => "location_address",
        }
    }
}

/// Repository trait for Location data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Location>, AppError>;

    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    async fn find_page(
        &self,
        filter: &LocationFilter,
        page: &PageRequest<LocationSortField>,
    ) -> Result<Page<Location>, AppError>;

    async fn create(&self, location: &Location) -> Result<Location, AppError>;

    async fn update(&self, location: &Location) -> Result<Location, AppError>;

    /// Delete by code. Returns false when nothing was deleted.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;
}
