//! Location Service
//!
//! Handles office location management.

use std::sync::Arc;

use async_trait::async_trait;

use super::{require_code, ServiceError};
use crate::domain::{
    Location, LocationFilter, LocationRepository, LocationSortField, Page, PageRequest,
};

/// Location service trait
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn list_locations(
        &self,
        filter: LocationFilter,
        page: PageRequest<LocationSortField>,
    ) -> Result<Page<Location>, ServiceError>;

    async fn get_location(&self, location_code: &str) -> Result<Location, ServiceError>;

    async fn create_location(&self, input: LocationInput) -> Result<Location, ServiceError>;

    async fn update_location(&self, input: LocationInput) -> Result<Location, ServiceError>;

    async fn delete_location(&self, location_code: &str) -> Result<String, ServiceError>;
}

/// Create/update payload
#[derive(Debug, Clone, Default)]
pub struct LocationInput {
    pub location_code: Option<String>,
    pub location_name: String,
    pub location_address: String,
}

impl LocationInput {
    fn into_location(self, location_code: String) -> Location {
        Location {
            location_code,
            location_name: self.location_name,
            location_address: self.location_address,
        }
    }
}

/// LocationService implementation
pub struct LocationServiceImpl<R>
where
    R: LocationRepository + ?Sized,
{
    location_repo: Arc<R>,
}

impl<R> LocationServiceImpl<R>
where
    R: LocationRepository + ?Sized,
{
    pub fn new(location_repo: Arc<R>) -> Self {
        Self { location_repo }
    }

    fn not_found(location_code: &str) -> ServiceError {
        ServiceError::NotFound(format!("Location not found with code: {}", location_code))
    }
}

#[async_trait]
impl<R> LocationService for LocationServiceImpl<R>
where
    R: LocationRepository + ?Sized + 'static,
{
    async fn list_locations(
        &self,
        filter: LocationFilter,
        page: PageRequest<LocationSortField>,
    ) -> Result<Page<Location>, ServiceError> {
        Ok(self.location_repo.find_page(&filter, &page).await?)
    }

    async fn get_location(&self, location_code: &str) -> Result<Location, ServiceError> {
        self.location_repo
            .find_by_code(location_code)
            .await?
            .ok_or_else(|| Self::not_found(location_code))
    }

    async fn create_location(&self, mut input: LocationInput) -> Result<Location, ServiceError> {
        let location_code = require_code(input.location_code.take(), "Location")?;

        if self.location_repo.exists(&location_code).await? {
            return Err(ServiceError::AlreadyExists(format!(
                "Location with code {} already exists.",
                location_code
            )));
        }

        let created = self
            .location_repo
            .create(&input.into_location(location_code))
            .await?;
        tracing::info!(location_code = %created.location_code, "Location created");

        Ok(created)
    }

    async fn update_location(&self, mut input: LocationInput) -> Result<Location, ServiceError> {
        let location_code = require_code(input.location_code.take(), "Location")?;

        if !self.location_repo.exists(&location_code).await? {
            return Err(Self::not_found(&location_code));
        }

        Ok(self
            .location_repo
            .update(&input.into_location(location_code))
            .await?)
    }

    async fn delete_location(&self, location_code: &str) -> Result<String, ServiceError> {
        if !self.location_repo.delete(location_code).await? {
            return Err(Self::not_found(location_code));
        }

        tracing::info!(location_code = %location_code, "Location deleted");
        Ok(format!(
            "Location with code {} deleted successfully.",
            location_code
        ))
    }
}
