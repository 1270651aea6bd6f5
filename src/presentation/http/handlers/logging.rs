//! API Call History Handlers
//!
//! Read-only queries over the audit log. Every filtered listing is newest first.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::{DateRangeQuery, EndpointQuery, HistoryParams};
use crate::application::services::{ApiCallHistoryService, ApiCallHistoryServiceImpl};
use crate::domain::{ApiCallFilter, ApiCallRecord, Page};
use crate::presentation::http::extractors::QueryParams;
use crate::shared::error::AppError;
use crate::startup::AppState;

type HistoryPage = Result<Json<Page<ApiCallRecord>>, AppError>;

async fn query(state: &AppState, filter: ApiCallFilter, params: &HistoryParams) -> HistoryPage {
    let page = params.page_request()?;
    let service = ApiCallHistoryServiceImpl::new(state.repos.api_calls.clone());
    Ok(Json(service.history(filter, page).await?))
}

/// All history, ordered by `sortBy`/`sortDir`
pub async fn history(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> HistoryPage {
    query(&state, ApiCallFilter::All, &params).await
}

pub async fn history_by_user(
    State(state): State<AppState>,
    Path(user_identifier): Path<String>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> HistoryPage {
    query(&state, ApiCallFilter::User(user_identifier), &params).await
}

pub async fn history_by_endpoint(
    State(state): State<AppState>,
    QueryParams(selector): QueryParams<EndpointQuery>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> HistoryPage {
    query(&state, ApiCallFilter::Endpoint(selector.endpoint), &params).await
}

pub async fn history_by_method(
    State(state): State<AppState>,
    Path(http_method): Path<String>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> HistoryPage {
    query(&state, ApiCallFilter::Method(http_method), &params).await
}

pub async fn history_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> HistoryPage {
    let status = status
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid status code: {}", status)))?;
    query(&state, ApiCallFilter::Status(status), &params).await
}

/// Inclusive range; `startDate` after `endDate` is rejected.
pub async fn history_by_date_range(
    State(state): State<AppState>,
    QueryParams(range): QueryParams<DateRangeQuery>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> HistoryPage {
    if range.start_date > range.end_date {
        return Err(AppError::Validation(
            "startDate must not be after endDate".into(),
        ));
    }

    let filter = ApiCallFilter::DateRange {
        start: range.start_date,
        end: range.end_date,
    };
    query(&state, filter, &params).await
}
