use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the session endpoints on `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // POST /setup - issue identity and token
        .route("/setup", post(handlers::setup))
        // POST /reconcile - delete offline users on demand
        .route("/reconcile", post(handlers::reconcile))
        // GET /users - directory snapshot
        .route("/users", get(handlers::list_users))
        .layer(Extension(service));

    tracing::debug!("session_bootstrap REST routes registered");
    Ok(router)
}
