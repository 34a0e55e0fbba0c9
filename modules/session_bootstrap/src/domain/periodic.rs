use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::contract::client::SessionBootstrapApi;

/// Re-run reconciliation every `every` until `cancel` fires.
///
/// The first pass happens one full period after spawning; startup runs its
/// own pass before the listener opens. A failing pass is logged and the loop
/// keeps going. Cancellation is only observed between passes.
pub fn spawn_periodic_reconcile(
    api: Arc<dyn SessionBootstrapApi>,
    every: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match api.reconcile().await {
                Ok(report) => info!(
                    scanned = report.scanned,
                    deleted = report.deleted,
                    failed = report.failures.len(),
                    "periodic reconciliation pass finished"
                ),
                Err(e) => error!(error = %e, "periodic reconciliation pass failed"),
            }
        }
        info!("periodic reconciliation stopped");
    })
}
