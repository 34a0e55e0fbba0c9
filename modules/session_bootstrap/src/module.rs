use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api::rest::routes::register_routes;
use crate::config::SessionBootstrapConfig;
use crate::contract::client::SessionBootstrapApi;
use crate::domain::periodic::spawn_periodic_reconcile;
use crate::domain::ports::DirectoryBackend;
use crate::domain::service::Service;
use crate::gateways::SessionBootstrapLocalClient;
use crate::infra::stream::{DeleteOptions, StreamDirectoryClient};
use modkit::TracedClient;

/// Wired session_bootstrap module: the domain service plus its in-process client.
pub struct SessionBootstrap {
    config: SessionBootstrapConfig,
    service: Arc<Service>,
    client: Arc<dyn SessionBootstrapApi>,
}

impl SessionBootstrap {
    /// Wire the module against the Stream REST API.
    pub fn init(config: SessionBootstrapConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid backend base URL '{}'", config.base_url))?;

        // Overall call deadlines are enforced by the domain layer.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("failed to build backend HTTP client")?;

        let backend = StreamDirectoryClient::new(
            TracedClient::from(http),
            base_url,
            config.api_key.clone(),
            &config.api_secret,
        )
        .with_delete_options(DeleteOptions {
            hard_delete: config.hard_delete,
            mark_messages_deleted: config.mark_messages_deleted,
        });

        tracing::info!(base_url = %config.base_url, "session_bootstrap module initialized");
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Wire the module against an arbitrary backend.
    pub fn with_backend(config: SessionBootstrapConfig, backend: Arc<dyn DirectoryBackend>) -> Self {
        let service = Arc::new(Service::new(backend, config.service_config()));
        let client: Arc<dyn SessionBootstrapApi> =
            Arc::new(SessionBootstrapLocalClient::new(Arc::clone(&service)));
        Self {
            config,
            service,
            client,
        }
    }

    pub fn client(&self) -> Arc<dyn SessionBootstrapApi> {
        Arc::clone(&self.client)
    }

    pub fn register_rest(&self, router: Router) -> anyhow::Result<Router> {
        register_routes(router, Arc::clone(&self.service))
    }

    /// Start background reconciliation if an interval is configured.
    pub fn spawn_background(&self, cancel: CancellationToken) -> Option<JoinHandle<()>> {
        self.config
            .reconcile_interval()
            .map(|every| spawn_periodic_reconcile(self.client(), every, cancel))
    }
}
