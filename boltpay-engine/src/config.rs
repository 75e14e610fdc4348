//! Orchestrator tuning knobs.

use std::time::Duration;

use boltpay_core::constants::{POLL_MAX_ATTEMPTS, POLL_MAX_INTERVAL_MS, POLL_START_INTERVAL_MS};

/// Tuning for the polling loop and fallback behavior.
///
/// Defaults match production timings; tests shrink the intervals so a full
/// polling exhaustion runs in milliseconds.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Hard ceiling on status fetches per invoice creation.
    pub poll_max_attempts: u32,
    /// Wait before the second fetch; grows by 1.5x per attempt.
    pub poll_start_interval: Duration,
    /// Cap on the grown interval.
    pub poll_max_interval: Duration,
    /// When set, a live invoice creation that cannot produce a BOLT11 string
    /// returns the error instead of a synthesized fallback record.
    pub strict_provisioning: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_max_attempts: POLL_MAX_ATTEMPTS,
            poll_start_interval: Duration::from_millis(POLL_START_INTERVAL_MS),
            poll_max_interval: Duration::from_millis(POLL_MAX_INTERVAL_MS),
            strict_provisioning: false,
        }
    }
}

impl EngineConfig {
    /// A configuration with near-zero intervals, for tests.
    pub fn fast() -> Self {
        Self {
            poll_max_attempts: POLL_MAX_ATTEMPTS,
            poll_start_interval: Duration::from_millis(1),
            poll_max_interval: Duration::from_millis(4),
            strict_provisioning: false,
        }
    }
}
