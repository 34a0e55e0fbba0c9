use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Error body shared by every endpoint. `error` stays the top-level key
/// existing clients read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                code: code.to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                request_id: None,
            },
        }
    }

    /// Attach the request id set by the ingress layer, if any.
    pub fn with_request_id(mut self, headers: &HeaderMap) -> Self {
        self.body.request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Map domain error to an HTTP error response
pub fn map_domain_error(e: &DomainError, headers: &HeaderMap) -> ApiError {
    let err = match e {
        DomainError::MissingField { .. } | DomainError::Validation { .. } => {
            ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION", e.to_string())
        }
        DomainError::Backend { .. } => {
            tracing::error!(error = %e, "Backend call failed");
            ApiError::new(StatusCode::BAD_GATEWAY, "BACKEND_UNAVAILABLE", e.to_string())
        }
        DomainError::BackendTimeout { .. } => {
            tracing::error!(error = %e, "Backend call timed out");
            ApiError::new(StatusCode::GATEWAY_TIMEOUT, "BACKEND_TIMEOUT", e.to_string())
        }
    };
    err.with_request_id(headers)
}

/// Malformed or non-JSON bodies are a client error like any other
/// validation failure.
pub fn map_json_rejection(rejection: &JsonRejection, headers: &HeaderMap) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION", rejection.body_text())
        .with_request_id(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    #[test]
    fn statuses_follow_error_category() {
        let h = HeaderMap::new();
        let cases = [
            (DomainError::missing_field("playerName"), StatusCode::BAD_REQUEST),
            (
                DomainError::validation("playerNumber", "must be a number or string"),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::backend("query_users", "503"), StatusCode::BAD_GATEWAY),
            (
                DomainError::backend_timeout("delete_user", Duration::from_millis(5)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(map_domain_error(&err, &h).status, status, "{err}");
        }
    }

    #[test]
    fn request_id_is_echoed() {
        let mut h = HeaderMap::new();
        h.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));
        let err = map_domain_error(&DomainError::missing_field("playerName"), &h);
        assert_eq!(err.body.request_id.as_deref(), Some("req-42"));
        assert_eq!(err.body.error, "playerName is required");
        assert_eq!(err.body.code, "VALIDATION");
    }
}
