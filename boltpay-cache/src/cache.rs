//! In-memory payment status cache with delayed terminal eviction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use boltpay_core::constants::CACHE_EVICTION_SECS;
use boltpay_core::PaymentRecord;

/// Cache of recently observed payment records, keyed by payment id.
///
/// A terminal (completed/failed) hit is served without any upstream call.
/// Terminal records are evicted a fixed delay after they were stored — the
/// window right after completion is when clients poll hardest, and bounding
/// the delay bounds memory growth.
///
/// Thread-safe; all mutations run under one lock per map operation.
pub struct StatusCache {
    entries: RwLock<HashMap<String, PaymentRecord>>,
    eviction_delay: Duration,
}

impl StatusCache {
    /// Creates a cache with the default 5-minute eviction delay.
    pub fn new() -> Self {
        Self::with_eviction_delay(Duration::from_secs(CACHE_EVICTION_SECS))
    }

    /// Creates a cache with a custom eviction delay.
    pub fn with_eviction_delay(eviction_delay: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            eviction_delay,
        }
    }

    /// Returns the cached record for an id, terminal or not.
    pub fn get(&self, id: &str) -> Option<PaymentRecord> {
        self.entries.read().get(id).cloned()
    }

    /// Returns the cached record only if its state is terminal.
    ///
    /// This is the short-circuit the orchestrator consults before touching
    /// the provider on a status query.
    pub fn get_terminal(&self, id: &str) -> Option<PaymentRecord> {
        self.entries
            .read()
            .get(id)
            .filter(|r| r.state.is_terminal())
            .cloned()
    }

    /// Stores a record, scheduling eviction if its state is terminal.
    pub fn put(self: &Arc<Self>, record: PaymentRecord) {
        let id = record.id.clone();
        let terminal = record.state.is_terminal();
        self.entries.write().insert(id.clone(), record);

        if terminal {
            let cache = Arc::clone(self);
            let delay = self.eviction_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                cache.remove(&id);
                debug!(id, "Evicted terminal payment from status cache");
            });
        }
    }

    /// Removes a record.
    pub fn remove(&self, id: &str) {
        self.entries.write().remove(id);
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops all cached records.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boltpay_core::{PaymentKind, PaymentState};

    fn record(id: &str, state: PaymentState) -> PaymentRecord {
        let mut r = PaymentRecord::new(id, PaymentKind::Invoice, "w-1", 500);
        r.state = state;
        r
    }

    #[tokio::test]
    async fn test_put_get() {
        let cache = Arc::new(StatusCache::new());
        cache.put(record("p-1", PaymentState::Pending));
        assert_eq!(cache.get("p-1").unwrap().id, "p-1");
        assert!(cache.get("missing").is_none());
    }

    #[tokio::test]
    async fn test_get_terminal_filters_pending() {
        let cache = Arc::new(StatusCache::new());
        cache.put(record("p-1", PaymentState::Pending));
        cache.put(record("p-2", PaymentState::Completed));
        cache.put(record("p-3", PaymentState::Failed));

        assert!(cache.get_terminal("p-1").is_none());
        assert!(cache.get_terminal("p-2").is_some());
        assert!(cache.get_terminal("p-3").is_some());
    }

    #[tokio::test]
    async fn test_terminal_record_evicts_after_delay() {
        let cache = Arc::new(StatusCache::with_eviction_delay(Duration::from_millis(20)));
        cache.put(record("p-1", PaymentState::Completed));
        assert!(cache.get_terminal("p-1").is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.get("p-1").is_none());
    }

    #[tokio::test]
    async fn test_pending_record_is_not_evicted() {
        let cache = Arc::new(StatusCache::with_eviction_delay(Duration::from_millis(20)));
        cache.put(record("p-1", PaymentState::Pending));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.get("p-1").is_some());
    }

    #[tokio::test]
    async fn test_pending_then_terminal_upgrade() {
        let cache = Arc::new(StatusCache::new());
        cache.put(record("p-1", PaymentState::Pending));
        cache.put(record("p-1", PaymentState::Completed));
        assert_eq!(cache.len(), 1);
        assert!(cache.get_terminal("p-1").is_some());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = Arc::new(StatusCache::new());
        cache.put(record("p-1", PaymentState::Pending));
        cache.clear();
        assert!(cache.is_empty());
    }
}
