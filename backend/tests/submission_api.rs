use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use folio_adapters::{
    FindQuery, MemoryStore, NewSubmission, StoreError, Submission, SubmissionStore,
};
use folio_backend::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt; // for `app.oneshot()`

fn app() -> Router {
    build_router(AppState::new(Arc::new(MemoryStore::new())))
}

fn jane() -> Value {
    json!({
        "fullname": "Jane Doe",
        "email": "JANE@Example.com",
        "address": "12 Main St, Springfield",
        "message": "Hello, I would like to get in touch about a project."
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn count(app: &Router) -> u64 {
    let (status, body) = get(app, "/users/count").await;
    assert_eq!(status, StatusCode::OK);
    body["count"].as_u64().unwrap()
}

#[tokio::test]
async fn submission_is_stored_with_lowercased_email() {
    let app = app();
    let before = count(&app).await;

    let (status, body) = post_json(&app, "/users", &jane()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["_message"], "Successfully submitted");
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["fullname"], "Jane Doe");
    assert_eq!(body["id"], body["data"]["id"]);
    assert_eq!(body["timestamp"], body["data"]["createdAt"]);

    assert_eq!(count(&app).await, before + 1);
}

#[tokio::test]
async fn stored_submission_is_readable_by_id() {
    let app = app();
    let (_, created) = post_json(&app, "/users", &jane()).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = get(&app, &format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], created["data"]);
}

#[tokio::test]
async fn unknown_id_is_404() {
    let (status, body) = get(&app(), "/users/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn missing_field_is_rejected_without_write() {
    let app = app();
    let mut payload = jane();
    payload.as_object_mut().unwrap().remove("address");

    let (status, body) = post_json(&app, "/users", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "ValidationFailed");
    assert_eq!(body["error"], "address is required");
    assert_eq!(body["details"][0]["field"], "address");

    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = app();
    let mut payload = jane();
    payload["email"] = json!("not-an-email");

    let (status, body) = post_json(&app, "/contact", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email must be a valid email address");
    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn malformed_and_unknown_bodies_are_validation_failures() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationFailed");

    let mut payload = jane();
    payload["role"] = json!("admin");
    let (status, body) = post_json(&app, "/users", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationFailed");

    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn oversized_body_is_413() {
    let app = app();
    let mut payload = jane();
    payload["message"] = json!("m".repeat(70 * 1024));

    let (status, body) = post_json(&app, "/users", &payload).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "PayloadTooLarge");
    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn maximal_escaped_submission_fits_the_default_limit() {
    let app = app();
    // ASCII-only encoders write each emoji as a twelve-byte surrogate pair escape.
    let emoji = |len: usize| r"\ud83d\ude00".repeat(len);
    let body = format!(
        r#"{{"fullname":"{}","email":"{}@example.com","address":"{}","message":"{}"}}"#,
        emoji(100),
        "a".repeat(243),
        emoji(500),
        emoji(2000),
    );
    assert!(body.len() > 16 * 1024);

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, created) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["fullname"], "\u{1F600}".repeat(100));
}

#[tokio::test]
async fn every_alias_reaches_the_same_handler() {
    let app = app();
    let aliases = [
        "/users",
        "/api/users",
        "/contact",
        "/api/contact",
        "/send-message",
        "/api/send-message",
    ];
    for alias in aliases {
        let (status, _) = post_json(&app, alias, &jane()).await;
        assert_eq!(status, StatusCode::CREATED, "alias {alias}");
    }
    assert_eq!(count(&app).await, aliases.len() as u64);
}

#[tokio::test]
async fn identical_submissions_create_distinct_records() {
    let app = app();
    let (_, first) = post_json(&app, "/users", &jane()).await;
    let (_, second) = post_json(&app, "/users", &jane()).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(count(&app).await, 2);
}

#[tokio::test]
async fn listing_pages_newest_first() {
    let app = app();
    for i in 0..12 {
        let mut payload = jane();
        payload["fullname"] = json!(format!("Sender {i:02}"));
        post_json(&app, "/users", &payload).await;
    }

    let (status, body) = get(&app, "/users?page=1&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(data[0]["fullname"], "Sender 11");
    assert_eq!(body["pagination"]["total"], count(&app).await);
    assert_eq!(body["pagination"]["pages"], 2);

    let created: Vec<DateTime<Utc>> = data
        .iter()
        .map(|item| item["createdAt"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(created.windows(2).all(|pair| pair[0] >= pair[1]));

    let (_, second) = get(&app, "/users?page=2&limit=10").await;
    assert_eq!(second["data"].as_array().unwrap().len(), 2);

    let (_, ascending) = get(&app, "/users?sort=asc&limit=1").await;
    assert_eq!(ascending["data"][0]["fullname"], "Sender 00");
}

#[tokio::test]
async fn bad_list_parameters_are_rejected() {
    let app = app();
    let (status, _) = get(&app, "/users?page=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/users?sort=fullname").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "sort");
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let app = app();
    post_json(&app, "/users", &jane()).await;

    let (status, body) = get(&app, &format!("/users?page={}", u64::MAX)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn health_reports_storage_and_totals() {
    let app = app();
    post_json(&app, "/users", &jane()).await;

    for path in ["/health", "/api/health"] {
        let (status, body) = get(&app, path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["database"]["backend"], "memory");
        assert_eq!(body["database"]["connected"], true);
        assert_eq!(body["submissions"]["total"], 1);
    }

    let (status, body) = get(&app, "/api/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Backend API is running!");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let request = Request::builder()
        .uri("/api/hello")
        .header("x-request-id", "req-test-1")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-test-1");
}

/// Store whose every call fails as if the database were unreachable.
struct UnreachableStore;

#[async_trait]
impl SubmissionStore for UnreachableStore {
    fn backend(&self) -> &'static str {
        "unreachable"
    }

    async fn insert(&self, _submission: NewSubmission) -> Result<Submission, StoreError> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn find(&self, _query: &FindQuery) -> Result<Vec<Submission>, StoreError> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Submission>, StoreError> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn count_by_email_since(
        &self,
        _email: &str,
        _since: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }
}

#[tokio::test]
async fn storage_failure_is_500_without_leaking_detail() {
    let app = build_router(AppState::new(Arc::new(UnreachableStore)));

    let (status, body) = post_json(&app, "/users", &jane()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");
    assert!(!body.to_string().contains("connection refused"));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "DEGRADED");
}

#[tokio::test]
async fn validation_runs_before_storage_is_touched() {
    let app = build_router(AppState::new(Arc::new(UnreachableStore)));
    let mut payload = jane();
    payload["fullname"] = json!("J");

    let (status, body) = post_json(&app, "/users", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "fullname must be between 2 and 100 characters"
    );
}
