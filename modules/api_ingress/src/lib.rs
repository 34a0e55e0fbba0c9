//! HTTP ingress: owns the listener and the shared middleware stack that
//! every module router is mounted under.

use anyhow::Result;
use axum::{error_handling::HandleErrorLayer, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
};

pub mod config;
pub mod request_id;
pub mod web;

pub use config::ApiIngressConfig;

#[derive(Clone, Debug, Default)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Mount `routes` next to `/health` and wrap everything in the
    /// ingress middleware.
    pub fn build_router(&self, routes: Router) -> Router {
        tracing::debug!("Building router");
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(routes)
            .fallback(web::not_found);

        // Layers are listed innermost first:
        // BodyLimit -> CORS -> Timeout -> push_req_id_to_extensions -> Trace -> PropagateRequestId -> SetRequestId
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        if let Some(timeout) = self.config.handler_timeout() {
            router = router.layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(web::handle_middleware_error))
                    .layer(TimeoutLayer::new(timeout)),
            );
        }

        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());

        let x_request_id = request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        router
    }

    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
        tracing::info!("HTTP server bound on {}", addr);
        Ok(listener)
    }

    /// Serve until `cancel` fires, then drain in-flight requests.
    pub async fn serve(
        &self,
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
