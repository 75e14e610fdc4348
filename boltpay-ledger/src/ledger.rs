//! Demo payment storage.

use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, instrument};

use boltpay_core::{PaymentRecord, PaymentState};

/// In-memory ledger of synthesized demo payments.
///
/// Thread-safe via a concurrent map; per-record mutation happens under the
/// map's shard lock, so the sweep never races a concurrent creation.
#[derive(Debug, Default)]
pub struct DemoLedger {
    records: DashMap<String, PaymentRecord>,
}

impl DemoLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Stores a synthesized record. Ownership passes to the ledger for the
    /// rest of the process lifetime.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub fn create(&self, record: PaymentRecord) {
        debug!(state = ?record.state, "Storing demo payment");
        self.records.insert(record.id.clone(), record);
    }

    /// Looks up a record by payment id.
    pub fn get(&self, id: &str) -> Option<PaymentRecord> {
        self.records.get(id).map(|r| r.clone())
    }

    /// Updates a record's state through the normal transition rules.
    pub fn transition(&self, id: &str, state: PaymentState) -> Option<PaymentRecord> {
        self.records.get_mut(id).map(|mut r| {
            r.transition(state);
            r.clone()
        })
    }

    /// Returns non-expired completed records, newest-created-first.
    ///
    /// This backs transaction-history queries for demo wallets.
    pub fn list_completed(&self) -> Vec<PaymentRecord> {
        let mut completed: Vec<PaymentRecord> = self
            .records
            .iter()
            .filter(|r| r.state == PaymentState::Completed)
            .map(|r| r.clone())
            .collect();
        completed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        completed
    }

    /// Marks records older than `retention` as expired.
    ///
    /// The transition is one-way and idempotent: records already expired are
    /// skipped entirely, leaving their `updated_at` untouched. Returns the
    /// number of records newly expired by this pass.
    #[instrument(skip(self))]
    pub fn sweep_expired(&self, retention: Duration) -> usize {
        let now = Utc::now();
        let retention = chrono::Duration::from_std(retention).unwrap_or(chrono::Duration::hours(1));
        let mut expired = 0;

        for mut entry in self.records.iter_mut() {
            if entry.state == PaymentState::Expired {
                continue;
            }
            if now.signed_duration_since(entry.created_at) > retention {
                // Completed is normally sticky; the sweep is the one writer
                // allowed to override it.
                entry.state = PaymentState::Expired;
                entry.updated_at = now;
                expired += 1;
                debug!(id = %entry.id, "Marked demo payment as expired");
            }
        }

        expired
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops all records.
    pub fn clear(&self) {
        self.records.clear();
    }
}
