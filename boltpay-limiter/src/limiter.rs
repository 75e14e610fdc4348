//! Sliding-window call admission per endpoint key.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use boltpay_core::constants::{RATE_LIMIT_MAX_CALLS, RATE_LIMIT_WINDOW_SECS};
use boltpay_core::error::{PayError, Result};

/// Rate limiter configuration.
#[derive(Clone, Debug)]
pub struct LimiterConfig {
    /// Length of the trailing window.
    pub window: Duration,
    /// Maximum calls admitted per key within one window.
    pub max_calls: usize,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            max_calls: RATE_LIMIT_MAX_CALLS,
        }
    }
}

/// Per-endpoint sliding-window rate limiter.
///
/// Each endpoint key owns an ordered list of call timestamps inside the
/// trailing window. Admission prunes stale entries, rejects when the window
/// is full, and records the call otherwise. The whole read-modify-write runs
/// under one mutex; windows for different keys share the map but admissions
/// are cheap enough that finer locking isn't warranted.
///
/// No state survives a process restart.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<Instant>>>,
    config: LimiterConfig,
}

impl RateLimiter {
    /// Creates a limiter with the default window (60 s / 30 calls).
    pub fn new() -> Self {
        Self::with_config(LimiterConfig::default())
    }

    /// Creates a limiter with a custom window.
    pub fn with_config(config: LimiterConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Admits or rejects a call for the given endpoint key.
    ///
    /// On rejection the error carries `retry_after_secs`: the whole seconds
    /// (rounded up) until the oldest recorded call ages out of the window.
    pub fn admit(&self, endpoint: &str) -> Result<()> {
        let now = Instant::now();
        let mut windows = self.windows.lock();
        let calls = windows.entry(endpoint.to_string()).or_default();

        // Prune entries older than the window before checking.
        calls.retain(|t| now.duration_since(*t) < self.config.window);

        if calls.len() >= self.config.max_calls {
            // Oldest surviving entry bounds the wait.
            let oldest = calls
                .iter()
                .min()
                .copied()
                .unwrap_or(now);
            let elapsed = now.duration_since(oldest);
            let wait = self.config.window.saturating_sub(elapsed);
            let retry_after_secs = (wait.as_millis() as u64).div_ceil(1_000).max(1);

            debug!(endpoint, retry_after_secs, "Rate limit window saturated");
            return Err(PayError::RateLimitExceeded {
                endpoint: endpoint.to_string(),
                retry_after_secs,
            });
        }

        calls.push(now);
        Ok(())
    }

    /// Number of calls currently recorded for a key (pruned view).
    pub fn window_len(&self, endpoint: &str) -> usize {
        let now = Instant::now();
        let windows = self.windows.lock();
        windows
            .get(endpoint)
            .map(|calls| {
                calls
                    .iter()
                    .filter(|t| now.duration_since(**t) < self.config.window)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Drops all recorded windows.
    pub fn clear(&self) {
        self.windows.lock().clear();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_limiter(max_calls: usize, window_ms: u64) -> RateLimiter {
        RateLimiter::with_config(LimiterConfig {
            window: Duration::from_millis(window_ms),
            max_calls,
        })
    }

    #[test]
    fn test_admits_up_to_ceiling() {
        let limiter = tight_limiter(3, 60_000);
        for _ in 0..3 {
            assert!(limiter.admit("/payments").is_ok());
        }
        assert_eq!(limiter.window_len("/payments"), 3);
    }

    #[test]
    fn test_rejects_over_ceiling_with_positive_retry_after() {
        let limiter = tight_limiter(3, 60_000);
        for _ in 0..3 {
            limiter.admit("/payments").unwrap();
        }

        match limiter.admit("/payments") {
            Err(PayError::RateLimitExceeded {
                endpoint,
                retry_after_secs,
            }) => {
                assert_eq!(endpoint, "/payments");
                assert!(retry_after_secs > 0);
                assert!(retry_after_secs <= 60);
            }
            other => panic!("expected rate limit rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = tight_limiter(1, 60_000);
        assert!(limiter.admit("/payments").is_ok());
        assert!(limiter.admit("/wallets").is_ok());
        assert!(limiter.admit("/payments").is_err());
    }

    #[test]
    fn test_window_expiry_readmits() {
        let limiter = tight_limiter(1, 20);
        assert!(limiter.admit("/payments").is_ok());
        assert!(limiter.admit("/payments").is_err());

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.admit("/payments").is_ok());
    }

    #[test]
    fn test_window_never_exceeds_ceiling_after_admission() {
        let limiter = tight_limiter(5, 60_000);
        for _ in 0..20 {
            let _ = limiter.admit("/payments");
        }
        assert!(limiter.window_len("/payments") <= 5);
    }

    #[test]
    fn test_clear() {
        let limiter = tight_limiter(1, 60_000);
        limiter.admit("/payments").unwrap();
        limiter.clear();
        assert!(limiter.admit("/payments").is_ok());
    }

    #[test]
    fn test_concurrent_admissions_respect_ceiling() {
        use std::sync::Arc;

        let limiter = Arc::new(tight_limiter(10, 60_000));
        let mut handles = Vec::new();

        for _ in 0..4 {
            let limiter = limiter.clone();
            handles.push(std::thread::spawn(move || {
                let mut admitted = 0;
                for _ in 0..10 {
                    if limiter.admit("/payments").is_ok() {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 10);
    }
}
