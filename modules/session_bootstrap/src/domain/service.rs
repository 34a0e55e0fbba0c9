use std::sync::Arc;
use std::time::Duration;

use crate::contract::model::{DirectoryEntry, IdentityRequest, IssuedSession, ReconciliationReport};
use crate::domain::error::DomainError;
use crate::domain::issuer::IdentityIssuer;
use crate::domain::ports::DirectoryBackend;
use crate::domain::reconciler::{DirectoryReconciler, ReconcilerConfig};

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub call_timeout: Duration,
    pub max_in_flight: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            max_in_flight: 8,
        }
    }
}

/// Domain service: the issuer and the reconciler over one shared backend
/// handle, constructed once at startup and read-only afterwards.
#[derive(Clone)]
pub struct Service {
    issuer: IdentityIssuer,
    reconciler: DirectoryReconciler,
}

impl Service {
    pub fn new(backend: Arc<dyn DirectoryBackend>, config: ServiceConfig) -> Self {
        Self {
            issuer: IdentityIssuer::new(Arc::clone(&backend), config.call_timeout),
            reconciler: DirectoryReconciler::new(
                backend,
                ReconcilerConfig {
                    call_timeout: config.call_timeout,
                    max_in_flight: config.max_in_flight,
                },
            ),
        }
    }

    pub async fn issue(&self, request: IdentityRequest) -> Result<IssuedSession, DomainError> {
        self.issuer.issue(request).await
    }

    pub async fn reconcile(&self) -> Result<ReconciliationReport, DomainError> {
        self.reconciler.reconcile().await
    }

    pub async fn list_users(&self) -> Result<Vec<DirectoryEntry>, DomainError> {
        self.reconciler.list_users().await
    }
}
