use async_trait::async_trait;

use crate::contract::{
    error::SessionBootstrapError,
    model::{DirectoryEntry, IdentityRequest, IssuedSession, ReconciliationReport},
};

/// Public API of the session bootstrap module.
#[async_trait]
pub trait SessionBootstrapApi: Send + Sync {
    /// Allocate a fresh identity and mint a backend token for it.
    async fn issue(&self, request: IdentityRequest) -> Result<IssuedSession, SessionBootstrapError>;

    /// Remove offline default-role users from the backend directory.
    async fn reconcile(&self) -> Result<ReconciliationReport, SessionBootstrapError>;

    /// Current directory snapshot, for operator visibility.
    async fn list_users(&self) -> Result<Vec<DirectoryEntry>, SessionBootstrapError>;
}
