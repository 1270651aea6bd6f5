//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, route, and status
//! - HTTP request latency histograms
//! - Audit records persisted, dropped on a full queue, and failed writes
//! - Database connection pool gauges

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

const NAMESPACE: &str = "hr_admin";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - total requests by method, route, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Audit records written to the database
pub static AUDIT_RECORDS_PERSISTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "audit_records_persisted_total",
            "Audit records written to api_call_history",
        )
        .namespace(NAMESPACE),
    )
    .expect("Failed to create AUDIT_RECORDS_PERSISTED metric")
});

/// Audit records rejected because the worker queue was full
pub static AUDIT_RECORDS_DROPPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "audit_records_dropped_total",
            "Audit records dropped because the queue was full",
        )
        .namespace(NAMESPACE),
    )
    .expect("Failed to create AUDIT_RECORDS_DROPPED metric")
});

/// Audit inserts that failed
pub static AUDIT_WRITE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("audit_write_failures_total", "Failed audit record inserts")
            .namespace(NAMESPACE),
    )
    .expect("Failed to create AUDIT_WRITE_FAILURES metric")
});

/// Database connection pool stats
pub static DB_POOL_CONNECTIONS: Lazy<GaugeVec> = Lazy::new(|| {
    GaugeVec::new(
        Opts::new("db_pool_connections", "Database connection pool statistics")
            .namespace(NAMESPACE),
        &["state"], // "idle", "active", "max"
    )
    .expect("Failed to create DB_POOL_CONNECTIONS metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(AUDIT_RECORDS_PERSISTED.clone()))
        .expect("Failed to register AUDIT_RECORDS_PERSISTED");
    registry
        .register(Box::new(AUDIT_RECORDS_DROPPED.clone()))
        .expect("Failed to register AUDIT_RECORDS_DROPPED");
    registry
        .register(Box::new(AUDIT_WRITE_FAILURES.clone()))
        .expect("Failed to register AUDIT_WRITE_FAILURES");
    registry
        .register(Box::new(DB_POOL_CONNECTIONS.clone()))
        .expect("Failed to register DB_POOL_CONNECTIONS");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to update database pool stats
pub fn update_db_pool_stats(idle: u32, active: u32, max: u32) {
    DB_POOL_CONNECTIONS
        .with_label_values(&["idle"])
        .set(f64::from(idle));
    DB_POOL_CONNECTIONS
        .with_label_values(&["active"])
        .set(f64::from(active));
    DB_POOL_CONNECTIONS
        .with_label_values(&["max"])
        .set(f64::from(max));
}
