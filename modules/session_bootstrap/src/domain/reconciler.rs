use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::contract::model::{DeleteFailure, DirectoryEntry, ReconciliationReport, UserFilter};
use crate::domain::deadline::bounded;
use crate::domain::error::DomainError;
use crate::domain::ports::DirectoryBackend;

#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Deadline for each backend call (snapshot and every single delete).
    pub call_timeout: Duration,
    /// Maximum number of delete requests in flight at once.
    pub max_in_flight: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            max_in_flight: 8,
        }
    }
}

/// Keeps the backend directory from growing across sessions by deleting
/// offline users that hold the default role.
#[derive(Clone)]
pub struct DirectoryReconciler {
    backend: Arc<dyn DirectoryBackend>,
    config: ReconcilerConfig,
}

impl DirectoryReconciler {
    pub fn new(backend: Arc<dyn DirectoryBackend>, config: ReconcilerConfig) -> Self {
        Self { backend, config }
    }

    /// Full unfiltered snapshot of the directory.
    #[instrument(name = "session_bootstrap.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<DirectoryEntry>, DomainError> {
        let filter = UserFilter::all();
        bounded(
            "query_users",
            self.config.call_timeout,
            self.backend.query_users(&filter),
        )
        .await
    }

    /// One scan-and-delete pass. Only a failed snapshot fails the pass;
    /// individual delete failures are reported in the result.
    #[instrument(name = "session_bootstrap.service.reconcile", skip(self))]
    pub async fn reconcile(&self) -> Result<ReconciliationReport, DomainError> {
        info!("running user directory clean-up");
        let entries = self.list_users().await?;
        let scanned = entries.len();

        let stale: Vec<String> = entries
            .into_iter()
            .filter(DirectoryEntry::is_stale)
            .map(|e| e.id)
            .collect();
        debug!(scanned, stale = stale.len(), "selected stale entries");

        let limit = self.config.max_in_flight.max(1);
        let outcomes: Vec<(String, Result<(), DomainError>)> = stream::iter(stale)
            .map(|id| {
                let backend = Arc::clone(&self.backend);
                let timeout = self.config.call_timeout;
                async move {
                    let result = bounded("delete_user", timeout, backend.delete_user(&id)).await;
                    (id, result)
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        let mut report = ReconciliationReport {
            scanned,
            ..Default::default()
        };
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => {
                    debug!(user_id = %id, "deleted stale user");
                    report.deleted += 1;
                }
                Err(e) => {
                    warn!(user_id = %id, error = %e, "failed to delete stale user");
                    report.failures.push(DeleteFailure {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        report.failures.sort_by(|a, b| a.id.cmp(&b.id));

        info!(
            scanned = report.scanned,
            deleted = report.deleted,
            failed = report.failures.len(),
            "user directory clean-up finished"
        );
        Ok(report)
    }
}
