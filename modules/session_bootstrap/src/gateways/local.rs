use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::SessionBootstrapApi,
    error::SessionBootstrapError,
    model::{DirectoryEntry, IdentityRequest, IssuedSession, ReconciliationReport},
};
use crate::domain::service::Service;

/// In-process implementation of [`SessionBootstrapApi`] delegating to the domain service
pub struct SessionBootstrapLocalClient {
    service: Arc<Service>,
}

impl SessionBootstrapLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SessionBootstrapApi for SessionBootstrapLocalClient {
    async fn issue(&self, request: IdentityRequest) -> Result<IssuedSession, SessionBootstrapError> {
        self.service.issue(request).await.map_err(Into::into)
    }

    async fn reconcile(&self) -> Result<ReconciliationReport, SessionBootstrapError> {
        self.service.reconcile().await.map_err(Into::into)
    }

    async fn list_users(&self) -> Result<Vec<DirectoryEntry>, SessionBootstrapError> {
        self.service.list_users().await.map_err(Into::into)
    }
}
