//! HTTP surface: status codes and payload shapes.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{entry, FakeBackend};
use serde_json::{json, Value};
use session_bootstrap::api::rest::routes::register_routes;
use session_bootstrap::domain::error::DomainError;
use session_bootstrap::domain::service::{Service, ServiceConfig};
use tower::ServiceExt;

fn app(backend: FakeBackend, call_timeout: Duration) -> Router {
    let svc = Arc::new(Service::new(
        Arc::new(backend),
        ServiceConfig {
            call_timeout,
            max_in_flight: 4,
        },
    ));
    register_routes(Router::new(), svc).unwrap()
}

fn setup_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/setup")
        .header("content-type", "application/json")
        .header("x-request-id", "req-1")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn setup_returns_user_props_and_token() {
    let app = app(FakeBackend::new(), Duration::from_secs(1));

    let (status, body) = send(
        app,
        setup_request(json!({"gameStates": {"playerName": "Ada", "playerNumber": 2}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let id = body["userProps"]["userID"].as_str().unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(body["userProps"]["playerName"], "Ada");
    assert_eq!(body["userProps"]["playerNumber"], 2);
    assert_eq!(body["token"], format!("token-for-{id}"));
}

#[tokio::test]
async fn setup_without_name_is_bad_request() {
    let app = app(FakeBackend::new(), Duration::from_secs(1));

    let (status, body) = send(
        app,
        setup_request(json!({"gameStates": {"playerNumber": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "playerName is required");
    assert_eq!(body["code"], "VALIDATION");
    assert_eq!(body["request_id"], "req-1");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn setup_without_game_states_is_bad_request() {
    let app = app(FakeBackend::new(), Duration::from_secs(1));

    let (status, body) = send(app, setup_request(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app(FakeBackend::new(), Duration::from_secs(1));
    let req = Request::builder()
        .method("POST")
        .uri("/setup")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
    assert!(body.get("request_id").is_none());
}

#[tokio::test]
async fn backend_failure_is_bad_gateway() {
    let backend = FakeBackend::new().failing_token(DomainError::backend("create_token", "down"));
    let app = app(backend, Duration::from_secs(1));

    let (status, body) = send(
        app,
        setup_request(json!({"gameStates": {"playerName": "Ada", "playerNumber": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "BACKEND_UNAVAILABLE");
    assert!(body["error"].as_str().unwrap().contains("create_token"));
}

#[tokio::test]
async fn backend_timeout_is_gateway_timeout() {
    let backend = FakeBackend::new().with_latency(Duration::from_secs(5));
    let app = app(backend, Duration::from_millis(30));

    let (status, body) = send(
        app,
        setup_request(json!({"gameStates": {"playerName": "Ada", "playerNumber": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["code"], "BACKEND_TIMEOUT");
}

#[tokio::test]
async fn reconcile_endpoint_reports_pass() {
    let backend = FakeBackend::new()
        .with_entries(vec![
            entry("a", false, "user"),
            entry("b", true, "user"),
            entry("c", false, "user"),
        ])
        .failing_delete("c");
    let app = app(backend, Duration::from_secs(1));
    let req = Request::builder()
        .method("POST")
        .uri("/reconcile")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scanned"], 3);
    assert_eq!(body["deleted"], 1);
    assert_eq!(body["failures"][0]["id"], "c");
}

#[tokio::test]
async fn reconcile_endpoint_surfaces_snapshot_failure() {
    let backend =
        FakeBackend::new().failing_query(DomainError::backend("query_users", "HTTP 500"));
    let app = app(backend, Duration::from_secs(1));
    let req = Request::builder()
        .method("POST")
        .uri("/reconcile")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app, req).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn reconcile_pass_survives_dropped_request() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_entries(vec![entry("a", false, "user"), entry("b", false, "user")])
            .with_latency(Duration::from_millis(200)),
    );
    let svc = Arc::new(Service::new(
        backend.clone(),
        ServiceConfig {
            call_timeout: Duration::from_secs(2),
            max_in_flight: 4,
        },
    ));
    let app = register_routes(Router::new(), svc).unwrap();
    let req = Request::builder()
        .method("POST")
        .uri("/reconcile")
        .body(Body::empty())
        .unwrap();

    // Caller gives up while the snapshot is still loading.
    let abandoned = tokio::time::timeout(Duration::from_millis(50), app.oneshot(req)).await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.deleted(), vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn users_endpoint_lists_directory() {
    let backend = FakeBackend::new().with_entries(vec![
        entry("a", false, "user"),
        entry("b", true, "admin"),
    ]);
    let app = app(backend, Duration::from_secs(1));
    let req = Request::builder()
        .uri("/users")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"users": [
            {"id": "a", "online": false, "role": "user"},
            {"id": "b", "online": true, "role": "admin"}
        ]})
    );
}
