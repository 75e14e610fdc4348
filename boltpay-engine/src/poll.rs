//! Bounded polling for asynchronously created invoices.

use tokio::time::sleep;
use tracing::{debug, warn};

use boltpay_core::constants::POLL_BACKOFF_FACTOR;
use boltpay_core::{PayError, ProviderPayment, Result, WalletProvider};

use crate::config::EngineConfig;

/// Polls the provider until the payment resolves or attempts run out.
///
/// Every status fetch counts toward the ceiling, including fetches that fail
/// transiently. Stop conditions, in priority order when a single response
/// satisfies more than one:
///
/// 1. the BOLT11 payment request materialized (success, even if the same
///    response also carries a stale error detail)
/// 2. the provider reports failure
/// 3. the payment completed without this poller observing the request string
///
/// The wait between fetches starts at the configured interval and grows 1.5x
/// per pending response, capped. A transient fetch error doubles the wait
/// instead, so an upstream outage backs off harder without resetting the
/// attempt count. A non-recoverable error aborts immediately.
pub(crate) async fn poll_for_invoice(
    provider: &dyn WalletProvider,
    id: &str,
    config: &EngineConfig,
) -> Result<ProviderPayment> {
    let mut interval = config.poll_start_interval;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match provider.get_payment(id).await {
            Ok(detail) if detail.has_payment_request() => {
                debug!(id, attempts, "Invoice ready");
                return Ok(detail);
            }
            Ok(detail) if detail.is_failed() => {
                let reason = detail
                    .error
                    .unwrap_or_else(|| format!("provider reported status {}", detail.status));
                return Err(PayError::PaymentCreationFailed(reason));
            }
            Ok(detail) if detail.is_completed() => {
                debug!(id, attempts, "Invoice completed before request observed");
                return Ok(detail);
            }
            Ok(_) => {
                debug!(id, attempts, interval_ms = interval.as_millis() as u64, "Invoice not ready yet");
                interval = interval
                    .mul_f64(POLL_BACKOFF_FACTOR)
                    .min(config.poll_max_interval);
            }
            Err(err) if !err.is_recoverable() => {
                return Err(PayError::PaymentCreationFailed(err.to_string()));
            }
            Err(err) => {
                warn!(id, attempts, %err, "Transient error while polling invoice");
                interval = (interval * 2).min(config.poll_max_interval);
            }
        }

        if attempts >= config.poll_max_attempts {
            return Err(PayError::PaymentCreationTimeout { attempts });
        }
        sleep(interval).await;
    }
}
