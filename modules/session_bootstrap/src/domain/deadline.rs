use std::future::Future;
use std::time::Duration;

use crate::domain::error::DomainError;

/// Run a backend call under `limit`; overrunning it is a backend error.
pub(crate) async fn bounded<T, F>(
    operation: &'static str,
    limit: Duration,
    call: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "backend call timed out"
            );
            Err(DomainError::backend_timeout(operation, limit))
        }
    }
}
