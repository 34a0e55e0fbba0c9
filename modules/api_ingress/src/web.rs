use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    BoxError,
};
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Error body in the same shape handlers use: `error`, `code`, `timestamp`
/// and the request id when one is set.
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    headers: &HeaderMap,
) -> Response {
    let mut body = json!({
        "error": message,
        "code": code,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    if let Some(id) = headers
        .get(crate::request_id::header())
        .and_then(|v| v.to_str().ok())
    {
        body["request_id"] = Value::String(id.to_owned());
    }
    (status, Json(body)).into_response()
}

/// JSON 404 for unknown routes.
pub async fn not_found(headers: HeaderMap) -> Response {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Not found", &headers)
}

/// Errors surfaced by the tower middleware (handler timeout).
pub async fn handle_middleware_error(headers: HeaderMap, err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request handler timed out");
        return error_response(
            StatusCode::REQUEST_TIMEOUT,
            "REQUEST_TIMEOUT",
            "Request timed out",
            &headers,
        );
    }
    tracing::error!(error = %err, "Unhandled middleware error");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL",
        "Internal server error",
        &headers,
    )
}
