// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use leavedesk_domain::format_iso_date;
use serde_json::{Value, json};
use tower::ServiceExt;

const TEST_BCRYPT_COST: u32 = 4;
const TEST_SECRET: &str = "server-test-secret-long-enough-for-hs512-signing";

struct TestApp {
    router: Router,
    tokens: TokenService,
    developer_role_id: i64,
}

impl TestApp {
    fn token_for(&self, username: &str) -> String {
        self.tokens
            .issue(username, OffsetDateTime::now_utc())
            .unwrap()
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request: Request<Body> = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }
}

/// Helper to create a test app with three login identities:
/// `root` (ADMIN), `mona` (MANAGER) and `ada` (EMPLOYEE).
fn create_test_app(strict_status_transitions: bool) -> TestApp {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");

    AuthenticationService::ensure_admin(&mut persistence, "root", "root-pass-1", TEST_BCRYPT_COST)
        .unwrap();
    AuthenticationService::register(&mut persistence, "ada", "lovelace1815", TEST_BCRYPT_COST)
        .unwrap();
    let mona: i64 =
        AuthenticationService::register(&mut persistence, "mona", "manager-42", TEST_BCRYPT_COST)
            .unwrap();
    let manager = persistence.find_role_by_name("MANAGER").unwrap().unwrap();
    persistence.assign_role(mona, manager.role_id).unwrap();
    let developer = persistence.create_role("Developer").unwrap();

    let tokens: TokenService = TokenService::new(TokenConfig {
        secret: String::from(TEST_SECRET),
        ttl: Duration::minutes(30),
        issuer: String::from("leavedesk"),
    })
    .unwrap();

    let state: AppState = build_state(
        persistence,
        tokens.clone(),
        strict_status_transitions,
        TEST_BCRYPT_COST,
    );

    TestApp {
        router: build_router(state),
        tokens,
        developer_role_id: developer.role_id,
    }
}

fn days_from_today(days: i64) -> String {
    format_iso_date(today() + Duration::days(days)).unwrap()
}

/// Creates the Engineering department and an employee record for `ada`,
/// returning `(department_id, employee_id)`.
async fn seed_employee(app: &TestApp) -> (i64, i64) {
    let root: String = app.token_for("root");
    let (status, body) = app
        .send(
            "POST",
            "/api/departments",
            Some(&root),
            Some(json!({ "name": "Engineering", "description": "Builds things" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    let department_id: i64 = body["data"]["departmentId"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/employees",
            Some(&root),
            Some(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "departmentId": department_id,
                "roleId": app.developer_role_id,
                "username": "ada"
            })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::CREATED, "{body}");
    let employee_id: i64 = body["data"]["employeeId"].as_i64().unwrap();

    (department_id, employee_id)
}

async fn submit(app: &TestApp, employee_id: i64, start: i64, end: i64) -> (HttpStatusCode, Value) {
    let ada: String = app.token_for("ada");
    app.send(
        "POST",
        &format!("/api/leaves/submit?employeeId={employee_id}"),
        Some(&ada),
        Some(json!({
            "startDate": days_from_today(start),
            "endDate": days_from_today(end),
            "reason": "Holiday"
        })),
    )
    .await
}

#[tokio::test]
async fn test_register_then_login() {
    let app: TestApp = create_test_app(false);

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "grace", "password": "hopper-1906" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body, Value::String(String::from("New Employee registered")));

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "grace", "password": "hopper-1906" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");

    let token: &str = body["access_token"].as_str().unwrap();
    assert_eq!(app.tokens.validate(token).unwrap().sub, "grace");
}

#[tokio::test]
async fn test_register_taken_username_is_bad_request() {
    let app: TestApp = create_test_app(false);

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "ada", "password": "another-pass-1" })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username is Taken!");
}

#[tokio::test]
async fn test_register_weak_password_is_bad_request() {
    let app: TestApp = create_test_app(false);

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "grace", "password": "short" })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app: TestApp = create_test_app(false);

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "ada", "password": "not-her-password" })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let app: TestApp = create_test_app(false);

    let (status, body) = app.send("GET", "/api/departments", None, None).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["errors"][0], "Missing Authorization header");
}

#[tokio::test]
async fn test_protected_route_with_bad_token_is_unauthorized() {
    let app: TestApp = create_test_app(false);

    let (status, body) = app
        .send("GET", "/api/departments", Some("not.a.token"), None)
        .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "JWT incorrect or expired");
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let app: TestApp = create_test_app(false);
    let ghost: String = app.token_for("ghost");

    let (status, _) = app.send("GET", "/api/leaves", Some(&ghost), None).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let app: TestApp = create_test_app(false);
    let ada: String = app.token_for("ada");
    let mona: String = app.token_for("mona");

    let (status, body) = app.send("GET", "/api/departments", Some(&ada), None).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["errors"][0], "Requires ADMIN role");

    let (status, _) = app.send("GET", "/api/leaves", Some(&ada), None).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (status, _) = app.send("GET", "/api/leaves", Some(&mona), None).await;
    assert_eq!(status, HttpStatusCode::OK);
}

#[tokio::test]
async fn test_submit_is_reserved_to_employees() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");

    let (status, _) = app
        .send(
            "POST",
            "/api/leaves/submit?employeeId=1",
            Some(&root),
            Some(json!({ "startDate": "2099-01-01", "endDate": "2099-01-02", "reason": "x" })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_department_crud_statuses() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");

    let (status, body) = app
        .send(
            "POST",
            "/api/departments",
            Some(&root),
            Some(json!({ "name": "Finance" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["message"], "Department has been saved.");
    let id: i64 = body["data"]["departmentId"].as_i64().unwrap();

    let (status, body) = app
        .send("GET", &format!("/api/departments/{id}"), Some(&root), None)
        .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"]["name"], "Finance");

    let (status, _) = app
        .send(
            "POST",
            "/api/departments",
            Some(&root),
            Some(json!({ "name": "Finance" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/departments/{id}"),
            Some(&root),
            Some(json!({ "departmentId": id + 1, "name": "Accounts" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "ID mismatch");

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/departments/{id}"),
            Some(&root),
            Some(json!({ "departmentId": id, "name": "Accounts" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"]["name"], "Accounts");

    let (status, body) = app
        .send("DELETE", &format!("/api/departments/{id}"), Some(&root), None)
        .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["message"], "Department was deleted");

    let (status, body) = app
        .send("GET", &format!("/api/departments/{id}"), Some(&root), None)
        .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Department not found");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_department_with_employees_cannot_be_deleted() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");
    let (department_id, _) = seed_employee(&app).await;

    let (status, body) = app
        .send(
            "DELETE",
            &format!("/api/departments/{department_id}"),
            Some(&root),
            None,
        )
        .await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Cannot delete department with existing employees"
    );
}

#[tokio::test]
async fn test_employee_listing_by_department() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");
    let (department_id, employee_id) = seed_employee(&app).await;

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/employees/department/{department_id}"),
            Some(&root),
            None,
        )
        .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"][0]["employeeId"], employee_id);
    assert_eq!(body["data"][0]["username"], "ada");

    let (status, _) = app
        .send("GET", "/api/employees/department/999", Some(&root), None)
        .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_with_unknown_username_is_bad_request() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");
    let (department_id, _) = seed_employee(&app).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/employees",
            Some(&root),
            Some(json!({
                "name": "Nobody",
                "email": "nobody@example.com",
                "departmentId": department_id,
                "roleId": app.developer_role_id,
                "username": "nobody"
            })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to find username");
}

#[tokio::test]
async fn test_leave_flow_submit_approve_and_overlap() {
    let app: TestApp = create_test_app(false);
    let mona: String = app.token_for("mona");
    let (_, employee_id) = seed_employee(&app).await;

    let (status, body) = submit(&app, employee_id, 10, 14).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"]["status"], "PENDING");
    let id: i64 = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/leaves/update/{id}"),
            Some(&mona),
            Some(json!({ "status": "APPROVED", "managerComment": "Enjoy" })),
        )
        .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"]["status"], "APPROVED");
    assert_eq!(body["data"]["managerComment"], "Enjoy");

    let (status, body) = submit(&app, employee_id, 14, 20).await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["message"], "Overlapping leave request");

    let (status, _) = submit(&app, employee_id, 15, 20).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, body) = app.send("GET", "/api/leaves", Some(&mona), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_submit_with_past_start_is_invalid_dates() {
    let app: TestApp = create_test_app(false);
    let (_, employee_id) = seed_employee(&app).await;

    let (status, body) = submit(&app, employee_id, -1, 3).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid dates");
}

#[tokio::test]
async fn test_submit_for_unknown_employee_is_not_found() {
    let app: TestApp = create_test_app(false);

    let (status, body) = submit(&app, 404, 1, 2).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employee not found");
}

#[tokio::test]
async fn test_strict_transitions_refuse_leaving_a_final_status() {
    let app: TestApp = create_test_app(true);
    let mona: String = app.token_for("mona");
    let (_, employee_id) = seed_employee(&app).await;

    let (_, body) = submit(&app, employee_id, 3, 4).await;
    let id: i64 = body["data"]["id"].as_i64().unwrap();
    let uri: String = format!("/api/leaves/update/{id}");

    let (status, _) = app
        .send("PUT", &uri, Some(&mona), Some(json!({ "status": "REJECTED" })))
        .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, body) = app
        .send("PUT", &uri, Some(&mona), Some(json!({ "status": "APPROVED" })))
        .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["message"], "Illegal status transition");
}

#[tokio::test]
async fn test_unknown_status_is_bad_request() {
    let app: TestApp = create_test_app(false);
    let mona: String = app.token_for("mona");

    let (status, body) = app
        .send(
            "PUT",
            "/api/leaves/update/1",
            Some(&mona),
            Some(json!({ "status": "MAYBE" })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid leave status");
}

#[tokio::test]
async fn test_leave_deletion_is_admin_only() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");
    let mona: String = app.token_for("mona");
    let (_, employee_id) = seed_employee(&app).await;

    let (_, body) = submit(&app, employee_id, 3, 4).await;
    let id: i64 = body["data"]["id"].as_i64().unwrap();
    let uri: String = format!("/api/leaves/{id}");

    let (status, _) = app.send("DELETE", &uri, Some(&mona), None).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (status, _) = app.send("DELETE", &uri, Some(&root), None).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = app.send("DELETE", &uri, Some(&root), None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_with_leave_requests_cannot_be_deleted() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");
    let (_, employee_id) = seed_employee(&app).await;
    submit(&app, employee_id, 3, 4).await;

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/employees/{employee_id}"),
            Some(&root),
            None,
        )
        .await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
}

#[tokio::test]
async fn test_submit_without_reason_is_enveloped_bad_request() {
    let app: TestApp = create_test_app(false);
    let ada: String = app.token_for("ada");
    let (_, employee_id) = seed_employee(&app).await;

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/leaves/submit?employeeId={employee_id}"),
            Some(&ada),
            Some(json!({
                "startDate": days_from_today(3),
                "endDate": days_from_today(4)
            })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["errors"][0].as_str().unwrap().contains("reason"));
}

#[tokio::test]
async fn test_submit_without_employee_id_is_enveloped_bad_request() {
    let app: TestApp = create_test_app(false);
    let ada: String = app.token_for("ada");
    seed_employee(&app).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/leaves/submit",
            Some(&ada),
            Some(json!({
                "startDate": days_from_today(3),
                "endDate": days_from_today(4),
                "reason": "Holiday"
            })),
        )
        .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid query string");
}

#[tokio::test]
async fn test_non_numeric_path_id_is_enveloped_bad_request() {
    let app: TestApp = create_test_app(false);
    let root: String = app.token_for("root");

    let (status, body) = app
        .send("DELETE", "/api/departments/abc", Some(&root), None)
        .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid path parameter");
    assert_eq!(body["data"], Value::Null);
}

#[test]
fn test_token_ttl_must_be_within_range() {
    let parse = |ttl: &str| {
        Args::try_parse_from([
            "leavedesk-server",
            "--jwt-secret",
            TEST_SECRET,
            "--token-ttl-minutes",
            ttl,
        ])
    };

    assert!(parse("0").is_err());
    assert!(parse("-5").is_err());
    assert!(parse("43201").is_err());
    assert_eq!(parse("90").unwrap().token_ttl_minutes, 90);
}
