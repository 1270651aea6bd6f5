//! API Call Audit Tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{test_settings, TestApp, EMPLOYEE_EMAIL};

#[tokio::test]
async fn api_calls_are_recorded() {
    let app = TestApp::new().await;

    app.post("/api/tier", json!({"tierCode": "T5", "tierName": "Lead"}))
        .await;
    let records = app.wait_for_audit(1).await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.api_endpoint, "/api/tier");
    assert_eq!(record.http_method, "POST");
    assert_eq!(record.response_status, 200);
    assert_eq!(record.user_identifier.as_deref(), Some(EMPLOYEE_EMAIL));
    assert!(record.request_body.as_deref().unwrap().contains("\"T5\""));
    assert!(record.response_body.as_deref().unwrap().contains("Lead"));
    assert!(record.request_duration_ms.is_some());
}

#[tokio::test]
async fn rejected_and_anonymous_calls_are_recorded() {
    let app = TestApp::new().await;

    app.request("GET", "/api/employee", None, None).await;
    let records = app.wait_for_audit(1).await;

    assert_eq!(records[0].response_status, 401);
    assert_eq!(records[0].user_identifier, None);
    assert_eq!(records[0].request_body, None);
}

#[tokio::test]
async fn health_endpoints_are_not_audited() {
    let app = TestApp::new().await;

    app.request("GET", "/health", None, None).await;
    app.get("/api/tier").await;
    let records = app.wait_for_audit(1).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].api_endpoint, "/api/tier");
}

#[tokio::test]
async fn long_bodies_are_truncated() {
    let app = TestApp::new().await;
    let name = "x".repeat(1500);

    app.post("/api/tier", json!({"tierCode": "T6", "tierName": name}))
        .await;
    let records = app.wait_for_audit(1).await;

    let body = records[0].request_body.as_deref().unwrap();
    assert!(body.ends_with("... [truncated]"));
    assert_eq!(body.chars().count(), 1000 + "... [truncated]".len());
}

#[tokio::test]
async fn history_queries() {
    let app = TestApp::new().await;
    app.get("/api/tier").await;
    app.get("/api/location/NOPE").await;
    app.delete("/api/department/D99").await;
    app.wait_for_audit(3).await;

    let (status, body) = app.get("/api/logging/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageSize"], 20);
    assert_eq!(body["totalElements"], 3);

    let (_, body) = app
        .get("/api/logging/history/endpoint?endpoint=LOCATION")
        .await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["data"][0]["apiEndpoint"], "/api/location/NOPE");

    let (_, body) = app.get("/api/logging/history/method/delete").await;
    assert_eq!(body["data"][0]["httpMethod"], "DELETE");

    let (_, body) = app.get("/api/logging/history/status/404").await;
    assert_eq!(body["totalElements"], 2);

    let (_, body) = app
        .get(&format!("/api/logging/history/user/{}", EMPLOYEE_EMAIL))
        .await;
    // Earlier history queries are audited too.
    assert!(body["totalElements"].as_i64().unwrap() >= 3);

    let (status, _) = app.get("/api/logging/history/status/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn date_range_is_validated() {
    let app = TestApp::new().await;

    let (status, _) = app
        .get("/api/logging/history/date-range?startDate=2024-02-01T00:00:00Z&endDate=2024-01-01T00:00:00Z")
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app
        .get("/api/logging/history/date-range?startDate=2000-01-01T00:00:00Z&endDate=2100-01-01T00:00:00Z")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_array());
}

#[tokio::test]
async fn forged_forwarded_for_is_clipped_to_column_width() {
    let app = TestApp::new().await;
    let forged = format!("{}, 10.0.0.1", "1".repeat(60));

    let request = Request::builder()
        .method("GET")
        .uri("/api/tier")
        .header("Authorization", format!("Bearer {}", app.token()))
        .header("X-Forwarded-For", forged)
        .body(Body::empty())
        .unwrap();
    app.send(request).await;
    let records = app.wait_for_audit(1).await;

    assert_eq!(records[0].client_ip.as_deref(), Some("1".repeat(45).as_str()));
}

#[tokio::test]
async fn long_token_subject_is_clipped_to_column_width() {
    let app = TestApp::new().await;
    let email = format!("{}@example.com", "a".repeat(120));
    let token = app.tokens.issue(&email).unwrap();

    let (status, _) = app.request("GET", "/api/tier", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let records = app.wait_for_audit(1).await;

    let user = records[0].user_identifier.as_deref().unwrap();
    assert_eq!(user.chars().count(), 100);
    assert!(email.starts_with(user));
}

fn oversized_app() -> TestApp {
    let mut settings = test_settings();
    settings.audit.max_request_bytes = 1024;
    TestApp::with_settings(settings)
}

#[tokio::test]
async fn oversized_streamed_body_is_rejected_before_auth() {
    let app = oversized_app();
    let name = "x".repeat(4096);

    let (status, body) = app
        .request(
            "POST",
            "/api/tier",
            Some(json!({"tierCode": "T9", "tierName": name})),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["message"], "Request body exceeds 1024 bytes");
}

#[tokio::test]
async fn oversized_declared_length_is_rejected_unread() {
    let app = oversized_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/tier")
        .header("Content-Type", "application/json")
        .header("Content-Length", "1048576")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn bodies_within_the_cap_pass_through() {
    let app = oversized_app();

    let (status, _) = app
        .request(
            "POST",
            "/api/tier",
            Some(json!({"tierCode": "T9", "tierName": "Lead"})),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
