//! Employee API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::common::{employee, TestApp};
use hr_admin::shared::password::verify_password;

fn new_employee(password: Value) -> Value {
    json!({
        "employeeNumber": "E010",
        "employeeName": "Sari Dewi",
        "tierCode": "T1",
        "locationCode": "JKT",
        "departmentCode": "D01",
        "supervisorCode": "E001",
        "salary": 7500000.5,
        "entryDate": "2021-03-01T09:00:00",
        "email": "sari@example.com",
        "password": password
    })
}

#[tokio::test]
async fn responses_never_include_password() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/employee").await;
    assert_eq!(status, StatusCode::OK);
    let first = body["data"][0].as_object().unwrap();
    assert_eq!(first["employeeNumber"], "E001");
    assert!(!first.contains_key("password"));
    assert!(!first.contains_key("passwordHash"));

    let (_, body) = app.get("/api/employee/E001").await;
    assert!(body.get("password").is_none());
    assert_eq!(body["salary"], json!(10000000.0));
}

#[tokio::test]
async fn create_hashes_password_and_allows_login() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/employee", new_employee(json!("Rahasia!"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entryDate"], "2021-03-01T09:00:00");
    assert_eq!(body["supervisorCode"], "E001");

    let stored = app
        .employees
        .all()
        .into_iter()
        .find(|e| e.employee_number == "E010")
        .unwrap();
    assert_ne!(stored.password_hash, "Rahasia!");
    assert!(verify_password("Rahasia!", &stored.password_hash).unwrap());
    assert_eq!(stored.salary, Some(Decimal::new(75_000_005, 1)));

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "sari@example.com", "password": "Rahasia!"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_requires_number_and_password() {
    let app = TestApp::new().await;

    let mut body = new_employee(json!("pw"));
    body["employeeNumber"] = json!("");
    let (status, resp) = app.post("/api/employee", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["message"], "Employee number cannot be null or empty.");

    let (status, resp) = app.post("/api/employee", new_employee(json!(null))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["message"], "Employee password cannot be null or empty.");

    let mut body = new_employee(json!("pw"));
    body["employeeNumber"] = json!("E001");
    let (status, resp) = app.post("/api/employee", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["message"], "Employee with employee number E001 already exists.");

    let mut body = new_employee(json!("pw"));
    body["email"] = json!("not-an-email");
    let (status, _) = app.post("/api/employee", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_with_blank_password_keeps_hash() {
    let app = TestApp::new().await;
    let before = app.employees.all()[0].password_hash.clone();

    let mut body = new_employee(json!(""));
    body["employeeNumber"] = json!("E001");
    body["employeeName"] = json!("Andi Pratama");
    let (status, resp) = app.put("/api/employee", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["employeeName"], "Andi Pratama");
    assert_eq!(app.employees.all()[0].password_hash, before);
}

#[tokio::test]
async fn update_and_get_missing_employee() {
    let app = TestApp::new().await;

    let (status, body) = app.put("/api/employee", new_employee(json!("pw"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employee not found with employee number: E010");

    let (status, _) = app.get("/api/employee/E404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_employee() {
    let app = TestApp::new().await;
    app.employees
        .insert(employee("E002", "Budi", "budi@example.com", 8_000_000));

    let (status, body) = app.delete("/api/employee/E002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee with code E002 deleted successfully.");

    let (status, _) = app.delete("/api/employee/E002").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_name_and_email() {
    let app = TestApp::new().await;
    app.employees
        .insert(employee("E002", "Budi Santoso", "budi@corp.example", 8_000_000));
    app.employees
        .insert(employee("E003", "Citra", "citra@corp.example", 9_000_000));

    let (_, body) = app.get("/api/employee?employeeEmail=CORP").await;
    assert_eq!(body["totalElements"], 2);

    let (_, body) = app.get("/api/employee?employeeName=santoso").await;
    assert_eq!(body["data"][0]["employeeNumber"], "E002");

    let (_, body) = app.get("/api/employee?employeeNumber=e003").await;
    assert_eq!(body["data"][0]["employeeName"], "Citra");
}

#[tokio::test]
async fn cumulative_salary_runs_per_department() {
    let app = TestApp::new().await;
    app.employees
        .insert(employee("E002", "Budi", "budi@example.com", 5_000_000));

    let (status, body) = app.get("/api/employee/cumulative-salary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["employeeNumber"], "E001");
    assert_eq!(body[0]["cumulativeSalary"], json!(10000000.0));
    assert_eq!(body[1]["employeeNumber"], "E002");
    assert_eq!(body[1]["cumulativeSalary"], json!(15000000.0));
}

#[tokio::test]
async fn analytics_routes_are_not_shadowed_by_lookup() {
    let app = TestApp::new().await;

    for uri in [
        "/api/employee/department-analysis",
        "/api/employee/employee-ranking",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body.is_array());
    }
}
