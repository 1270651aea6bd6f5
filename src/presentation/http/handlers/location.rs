//! Location Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::{MessageResponse, LocationListParams, LocationRequest};
use crate::application::services::{LocationService, LocationServiceImpl};
use crate::domain::{Page, Location, LocationRepository};
use crate::presentation::http::extractors::{QueryParams, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn service(state: &AppState) -> LocationServiceImpl<dyn LocationRepository> {
    LocationServiceImpl::new(state.repos.locations.clone())
}

/// List locations. Name and address filters match substrings.
pub async fn list_locations(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LocationListParams>,
) -> Result<Json<Page<Location>>, AppError> {
    let page = params.page_request()?;
    let result = service(&state).list_locations(params.filter(), page).await?;
    Ok(Json(result))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(location_code): Path<String>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(service(&state).get_location(&location_code).await?))
}

pub async fn create_location(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LocationRequest>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(service(&state).create_location(body.into()).await?))
}

/// Full overwrite, keyed by `locationCode`
pub async fn update_location(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LocationRequest>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(service(&state).update_location(body.into()).await?))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_code): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = service(&state).delete_location(&location_code).await?;
    Ok(Json(MessageResponse::new(message)))
}
