use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Resolve once the process receives SIGINT/SIGTERM (Ctrl+C elsewhere).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("shutdown: SIGTERM received"),
            _ = sigint.recv()  => tracing::info!("shutdown: SIGINT received"),
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        tracing::info!("shutdown: Ctrl+C received");
        Ok(())
    }
}

/// Spawn a watcher that cancels `token` on the first shutdown signal.
///
/// Returns a child token that callers can hand to background tasks.
pub fn cancel_on_shutdown(token: CancellationToken) -> CancellationToken {
    let child = token.child_token();
    tokio::spawn(async move {
        tokio::select! {
            res = wait_for_shutdown() => {
                if let Err(e) = res {
                    tracing::error!(error = %e, "shutdown: failed to install signal handlers");
                }
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    });
    child
}
