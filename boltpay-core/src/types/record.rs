//! The unified payment record produced by every execution path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{PaymentKind, PaymentState};

/// A payment as the engine knows it, regardless of which path produced it.
///
/// Live, temporary, and demo paths all normalize into this one shape so that
/// callers never need to know which path ran. Amounts are always satoshis
/// here; millisatoshis exist only on the provider wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment identifier (provider id or synthesized `demo-*` id).
    pub id: String,
    /// Invoice (receive) or send.
    pub kind: PaymentKind,
    /// Wallet this payment belongs to.
    pub wallet_ref: String,
    /// Amount in satoshis.
    pub amount_sats: u64,
    /// Free-form memo/description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Current lifecycle state.
    pub state: PaymentState,
    /// BOLT11 payment request string (invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_request: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last state-transition time.
    pub updated_at: DateTime<Utc>,
    /// True for records synthesized without touching the provider.
    pub is_demo: bool,
    /// Set only when a live operation fell back to a synthesized record.
    /// A genuine demo-mode record has `is_demo = true` and no warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl PaymentRecord {
    /// Creates a pending record owned by the orchestrating call.
    pub fn new(
        id: impl Into<String>,
        kind: PaymentKind,
        wallet_ref: impl Into<String>,
        amount_sats: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind,
            wallet_ref: wallet_ref.into(),
            amount_sats,
            memo: None,
            state: PaymentState::Pending,
            payment_request: None,
            created_at: now,
            updated_at: now,
            is_demo: false,
            warning: None,
        }
    }

    /// Sets the memo.
    pub fn with_memo(mut self, memo: Option<String>) -> Self {
        self.memo = memo;
        self
    }

    /// Attaches the BOLT11 payment request.
    pub fn with_payment_request(mut self, request: impl Into<String>) -> Self {
        self.payment_request = Some(request.into());
        self
    }

    /// Marks the record as synthesized.
    pub fn demo(mut self) -> Self {
        self.is_demo = true;
        self
    }

    /// Flags the record as a live-path fallback.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Transitions to a new state, bumping `updated_at`.
    ///
    /// Terminal states are sticky: once terminal, further transitions are
    /// ignored (idempotent by design, including `updated_at`).
    pub fn transition(&mut self, state: PaymentState) {
        if self.state.is_terminal() {
            return;
        }
        self.state = state;
        self.updated_at = Utc::now();
    }

    /// True if this record carries the demo-fallback warning.
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}
