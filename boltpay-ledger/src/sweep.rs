//! Periodic expiry sweeping.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::DemoLedger;

/// Spawns the background task that periodically expires old demo records.
///
/// Runs for the process lifetime; the returned handle can be aborted in
/// tests. The first tick fires after one full interval, not immediately.
pub fn spawn_expiry_sweeper(
    ledger: Arc<DemoLedger>,
    interval: Duration,
    retention: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The immediate first tick would sweep an empty ledger.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let expired = ledger.sweep_expired(retention);
            if expired > 0 {
                info!(expired, "Expired stale demo payments");
            }
        }
    })
}
