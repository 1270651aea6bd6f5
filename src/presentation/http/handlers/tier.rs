//! Tier Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::{MessageResponse, TierListParams, TierRequest};
use crate::application::services::{TierService, TierServiceImpl};
use crate::domain::{Page, Tier, TierRepository};
use crate::presentation::http::extractors::{QueryParams, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn service(state: &AppState) -> TierServiceImpl<dyn TierRepository> {
    TierServiceImpl::new(state.repos.tiers.clone())
}

/// List tiers with filters and paging
pub async fn list_tiers(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TierListParams>,
) -> Result<Json<Page<Tier>>, AppError> {
    let page = params.page_request()?;
    let result = service(&state).list_tiers(params.filter(), page).await?;
    Ok(Json(result))
}

pub async fn get_tier(
    State(state): State<AppState>,
    Path(tier_code): Path<String>,
) -> Result<Json<Tier>, AppError> {
    Ok(Json(service(&state).get_tier(&tier_code).await?))
}

pub async fn create_tier(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<TierRequest>,
) -> Result<Json<Tier>, AppError> {
    Ok(Json(service(&state).create_tier(body.into()).await?))
}

/// Full overwrite of an existing tier
pub async fn update_tier(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<TierRequest>,
) -> Result<Json<Tier>, AppError> {
    Ok(Json(service(&state).update_tier(body.into()).await?))
}

pub async fn delete_tier(
    State(state): State<AppState>,
    Path(tier_code): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = service(&state).delete_tier(&tier_code).await?;
    Ok(Json(MessageResponse::new(message)))
}
