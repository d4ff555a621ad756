use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use campus_auth_types::bearer::SessionSecret;
use campus_domain::role::Role;
use campus_school::router::build_router;
use campus_school::state::AppState;
use campus_testing::auth::{MockSession, TEST_JWT_SECRET};

/// Router over a disconnected database. Only paths that fail before the
/// repository layer are exercised here.
fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        session_secret: SessionSecret::new(TEST_JWT_SECRET),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    let server = test_server();

    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = test_server();

    let response = server.get("/readyz").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id_to_responses() {
    let server = test_server();

    let generated = server.get("/healthz").await;
    assert!(generated.headers().get("x-request-id").is_some());

    let echoed = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(echoed.headers().get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn should_reject_missing_bearer_token() {
    let server = test_server();

    let response = server
        .post("/api/admin/create-class")
        .json(&json!({
            "className": "ten",
            "teacherName": "Ms Rivera",
            "year": 2026,
            "studentsFees": 1500
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_TOKEN");
}

#[tokio::test]
async fn should_reject_malformed_token() {
    let server = test_server();

    let response = server
        .get("/api/teachers/search-teacher")
        .authorization_bearer("not.a.jwt")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_forbid_non_admin_from_admin_routes() {
    let server = test_server();
    let teacher = MockSession::new("jdoe@school.test", Role::Teacher);

    let response = server
        .post("/api/admin/create-class")
        .authorization_bearer(teacher.token())
        .json(&json!({
            "className": "ten",
            "teacherName": "Ms Rivera",
            "year": 2026,
            "studentsFees": 1500
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_forbid_deleting_someone_else() {
    let server = test_server();
    let student = MockSession::new("a@school.test", Role::Student);

    let response = server
        .delete("/api/students/delete-student/b@school.test")
        .authorization_bearer(student.token())
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_invalid_pagination() {
    let server = test_server();
    let admin = MockSession::admin();

    for (page, limit) in [("0", "10"), ("1", "-5"), ("abc", "10")] {
        let response = server
            .get("/api/admin/search-class")
            .authorization_bearer(admin.token())
            .add_query_param("page", page)
            .add_query_param("limit", limit)
            .await;

        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "page={page} limit={limit}"
        );
        assert_eq!(response.json::<Value>()["kind"], "INVALID_PAGINATION");
    }
}

#[tokio::test]
async fn should_report_malformed_body_as_invalid_input() {
    let server = test_server();

    let response = server
        .post("/api/teachers/signin")
        .json(&json!({ "userName": "jdoe@school.test" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_reject_signup_with_fields_of_other_role() {
    let server = test_server();

    let response = server
        .post("/api/admin/signup")
        .json(&json!({
            "userName": "principal@school.test",
            "password": "password123",
            "firstName": "Pat",
            "lastName": "Lee",
            "gender": "female",
            "contactNumber": "0123456789",
            "feesPaid": 100
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_validate_class_before_touching_storage() {
    let server = test_server();
    let admin = MockSession::admin();

    let response = server
        .post("/api/admin/create-class")
        .authorization_bearer(admin.token())
        .json(&json!({
            "className": "x",
            "teacherName": "Ms Rivera",
            "year": 2026,
            "studentsFees": 1500
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_not_expose_admin_routes_under_other_namespaces() {
    let server = test_server();
    let admin = MockSession::admin();

    let response = server
        .get("/api/teachers/class-analytics")
        .authorization_bearer(admin.token())
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
