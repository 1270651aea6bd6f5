//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{audit_middleware, auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `/api` routes. Every call, public or not, is audited.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(protected_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, audit_middleware))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
}

/// Everything else under `/api` requires a bearer token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(reference_routes())
        .merge(employee_routes())
        .merge(logging_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn reference_routes() -> Router<AppState> {
    use super::handlers::{department, location, tier};

    Router::new()
        .route(
            "/api/tier",
            get(tier::list_tiers)
                .post(tier::create_tier)
                .put(tier::update_tier),
        )
        .route(
            "/api/tier/{tier_code}",
            get(tier::get_tier).delete(tier::delete_tier),
        )
        .route(
            "/api/location",
            get(location::list_locations)
                .post(location::create_location)
                .put(location::update_location),
        )
        .route(
            "/api/location/{location_code}",
            get(location::get_location).delete(location::delete_location),
        )
        .route(
            "/api/department",
            get(department::list_departments)
                .post(department::create_department)
                .put(department::update_department),
        )
        .route(
            "/api/department/{department_code}",
            get(department::get_department).delete(department::delete_department),
        )
}

fn employee_routes() -> Router<AppState> {
    use super::handlers::employee;

    Router::new()
        .route(
            "/api/employee",
            get(employee::list_employees)
                .post(employee::create_employee)
                .put(employee::update_employee),
        )
        .route(
            "/api/employee/cumulative-salary",
            get(employee::cumulative_salary),
        )
        .route(
            "/api/employee/department-analysis",
            get(employee::department_analysis),
        )
        .route(
            "/api/employee/employee-ranking",
            get(employee::employee_ranking),
        )
        .route(
            "/api/employee/{employee_number}",
            get(employee::get_employee).delete(employee::delete_employee),
        )
}

fn logging_routes() -> Router<AppState> {
    use super::handlers::logging;

    Router::new()
        .route("/api/logging/history", get(logging::history))
        .route(
            "/api/logging/history/user/{user_identifier}",
            get(logging::history_by_user),
        )
        .route(
            "/api/logging/history/endpoint",
            get(logging::history_by_endpoint),
        )
        .route(
            "/api/logging/history/method/{http_method}",
            get(logging::history_by_method),
        )
        .route(
            "/api/logging/history/status/{status}",
            get(logging::history_by_status),
        )
        .route(
            "/api/logging/history/date-range",
            get(logging::history_by_date_range),
        )
}
