//! Health and Metrics Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::new().await;

    let (status, body) = app.request("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn liveness_works() {
    let app = TestApp::new().await;

    let (status, body) = app.request("GET", "/health/live", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn readiness_reports_unreachable_database() {
    let app = TestApp::new().await;

    let (status, body) = app.request("GET", "/health/ready", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["status"], "unhealthy");
    assert!(body["database"]["pool"]["max"].is_number());
}

#[tokio::test]
async fn metrics_expose_request_counters() {
    let app = TestApp::new().await;
    app.get("/api/tier").await;

    let (status, body) = app.request("GET", "/metrics", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap();
    assert!(text.contains("hr_admin_http_requests_total"));
    assert!(text.contains("/api/tier"));
}
