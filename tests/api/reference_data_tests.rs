//! Tier, Location and Department API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;
use hr_admin::domain::{Location, Tier};

#[tokio::test]
async fn list_tiers_uses_default_paging() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/tier").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageNumber"], 0);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["data"][0], json!({"tierCode": "T1", "tierName": "Staff"}));
}

#[tokio::test]
async fn list_tiers_filters_and_sorts() {
    let app = TestApp::new().await;
    for (code, name) in [("T2", "Supervisor"), ("T3", "Senior Staff"), ("T4", "Manager")] {
        app.tiers.insert(Tier {
            tier_code: code.into(),
            tier_name: name.into(),
        });
    }

    let (status, body) = app.get("/api/tier?tierName=STAFF&sortBy=tierName").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["data"][0]["tierCode"], "T3");
    assert_eq!(body["data"][1]["tierCode"], "T1");

    let (_, body) = app.get("/api/tier?tierCode=t4").await;
    assert_eq!(body["data"][0]["tierName"], "Manager");

    let (_, body) = app.get("/api/tier?tierCode=").await;
    assert_eq!(body["totalElements"], 4);
}

#[tokio::test]
async fn page_past_the_end_keeps_totals() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/tier?pageNumber=5&pageSize=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn invalid_paging_is_rejected() {
    let app = TestApp::new().await;

    for uri in [
        "/api/tier?pageSize=0",
        "/api/tier?pageSize=1001",
        "/api/tier?pageNumber=-1",
        "/api/tier?sortBy=salary",
    ] {
        let (status, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
    }

    let (status, _) = app.get("/api/tier?pageSize=ten").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tier_lifecycle() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/tier", json!({"tierCode": "T9", "tierName": "Director"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tierCode"], "T9");

    let (status, body) = app
        .put("/api/tier", json!({"tierCode": "T9", "tierName": "Vice Director"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tierName"], "Vice Director");

    let (status, body) = app.get("/api/tier/T9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tierName"], "Vice Director");

    let (status, body) = app.delete("/api/tier/T9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tier with code T9 deleted successfully.");

    let (status, body) = app.get("/api/tier/T9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tier not found with code: T9");
}

#[tokio::test]
async fn tier_create_rules() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/tier", json!({"tierCode": "T1", "tierName": "Again"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Tier with code T1 already exists.");

    for code in [json!(null), json!(""), json!("   ")] {
        let (status, body) = app
            .post("/api/tier", json!({"tierCode": code, "tierName": "Nameless"}))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Tier code cannot be null or empty.");
    }

    let (status, _) = app.post("/api/tier", json!({"tierCode": "T8"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .post("/api/tier", json!({"tierCode": "TOOLONG", "tierName": "x"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_and_delete_of_missing_rows_are_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app
        .put("/api/department", json!({"departmentCode": "D99", "departmentName": "Ghost"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete("/api/department/D99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Department not found with code: D99");
    assert_eq!(app.departments.len(), 1);
}

#[tokio::test]
async fn location_update_is_keyed_by_code() {
    let app = TestApp::new().await;

    let (status, body) = app
        .put(
            "/api/location",
            json!({
                "locationCode": "JKT",
                "locationName": "Jakarta Selatan",
                "locationAddress": "Jl. Gatot Subroto 2"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locationName"], "Jakarta Selatan");
    assert_eq!(
        app.locations.all(),
        vec![Location {
            location_code: "JKT".into(),
            location_name: "Jakarta Selatan".into(),
            location_address: "Jl. Gatot Subroto 2".into(),
        }]
    );
}

#[tokio::test]
async fn locations_default_to_name_order() {
    let app = TestApp::new().await;
    app.locations.insert(Location {
        location_code: "BDG".into(),
        location_name: "Bandung".into(),
        location_address: "Jl. Asia Afrika 8".into(),
    });

    let (_, body) = app.get("/api/location").await;
    assert_eq!(body["data"][0]["locationCode"], "BDG");

    let (_, body) = app.get("/api/location?locationAddress=sudirman").await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["data"][0]["locationCode"], "JKT");
}

#[tokio::test]
async fn department_create_and_filter() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/department",
            json!({"departmentCode": "D02", "departmentName": "Human Resources"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/department?departmentName=human").await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["data"][0]["departmentCode"], "D02");
}
