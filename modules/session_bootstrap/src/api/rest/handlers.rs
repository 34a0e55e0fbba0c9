use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::Extension;
use tracing::{error, info};

use crate::api::rest::dto::{DirectoryDto, ReconcileReportDto, SetupReq, SetupResp};
use crate::api::rest::error::{map_domain_error, map_json_rejection, ApiError};
use crate::contract::model::IdentityRequest;
use crate::domain::service::Service;

/// Issue a fresh identity and backend token for a player
pub async fn setup(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
    body: Result<Json<SetupReq>, JsonRejection>,
) -> Result<Json<SetupResp>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        info!("Rejected setup body: {}", rejection.body_text());
        map_json_rejection(&rejection, &headers)
    })?;

    match svc.issue(IdentityRequest::from(req)).await {
        Ok(session) => {
            info!(user_id = %session.identity.id, "Issued session");
            Ok(Json(SetupResp::from(session)))
        }
        Err(e) => {
            if e.is_validation() {
                info!("Setup rejected: {}", e);
            } else {
                error!("Failed to issue session: {}", e);
            }
            Err(map_domain_error(&e, &headers))
        }
    }
}

/// Run one reconciliation pass on demand.
///
/// The pass runs in its own task: if the request is dropped (client gone,
/// handler timeout) the in-flight deletes still complete.
pub async fn reconcile(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
) -> Result<Json<ReconcileReportDto>, ApiError> {
    let pass = tokio::spawn(async move { svc.reconcile().await });
    let outcome = pass.await.map_err(|e| {
        error!("Reconciliation task failed: {}", e);
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "reconciliation task failed",
        )
        .with_request_id(&headers)
    })?;

    match outcome {
        Ok(report) => Ok(Json(ReconcileReportDto::from(report))),
        Err(e) => {
            error!("Reconciliation failed: {}", e);
            Err(map_domain_error(&e, &headers))
        }
    }
}

/// Current directory snapshot, for diagnostics
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    headers: HeaderMap,
) -> Result<Json<DirectoryDto>, ApiError> {
    match svc.list_users().await {
        Ok(entries) => Ok(Json(DirectoryDto {
            users: entries.into_iter().map(Into::into).collect(),
        })),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, &headers))
        }
    }
}
