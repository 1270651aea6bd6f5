//! Health Check Handlers
//!
//! Provides health check endpoints for liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (can the server reach the database?)

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::infrastructure::metrics;
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Database round trips slower than this report `degraded`
const DB_DEGRADED_LATENCY_MS: u64 = 100;

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness response with the database check and pool usage
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub pool: PoolStats,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PoolStats {
    pub idle: u32,
    pub active: u32,
    pub max: u32,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn from_latency(latency_ms: u64) -> Self {
        if latency_ms < DB_DEGRADED_LATENCY_MS {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        }
    }

    fn status_code(self) -> StatusCode {
        match self {
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe - returns 503 if the database is unavailable
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let database = check_database(&state).await;
    let status = database.status;

    let response = ReadinessResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        database,
    };

    (status.status_code(), Json(response))
}

fn pool_stats(state: &AppState) -> PoolStats {
    let idle = u32::try_from(state.db.num_idle()).unwrap_or(u32::MAX);
    let stats = PoolStats {
        idle,
        active: state.db.size().saturating_sub(idle),
        max: state.settings.database.max_connections,
    };
    metrics::update_db_pool_stats(stats.idle, stats.active, stats.max);
    stats
}

/// `SELECT 1` round trip
async fn check_database(state: &AppState) -> DatabaseHealth {
    let start = Instant::now();
    let result = sqlx::query("SELECT 1").execute(&state.db).await;
    let pool = pool_stats(state);

    match result {
        Ok(_) => {
            let latency = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            DatabaseHealth {
                status: HealthStatus::from_latency(latency),
                latency_ms: Some(latency),
                message: None,
                pool,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            DatabaseHealth {
                status: HealthStatus::Unhealthy,
                latency_ms: None,
                message: Some(format!("Database connection failed: {}", e)),
                pool,
            }
        }
    }
}
