//! Common traits for boltpay.
//!
//! `WalletProvider` is the seam between the payment orchestrator and the
//! wallet-as-a-service API. The real implementation lives in
//! `boltpay-upstream`; tests substitute call-counting mocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PaymentKind;

// ═══════════════════════════════════════════════════════════════════════════════
// PROVIDER DATA SHAPES
// ═══════════════════════════════════════════════════════════════════════════════

/// A payment creation request as submitted to the provider.
///
/// The id is generated locally and doubles as an idempotency key: the
/// provider accepts creation asynchronously, and all follow-up polling uses
/// this same id. Amounts here are millisatoshis, the provider's native unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPayment {
    /// Locally generated idempotent identifier.
    pub id: String,
    /// Provider wallet to create the payment under.
    pub wallet_id: String,
    /// Invoice (receive) or send.
    pub kind: PaymentKind,
    /// Requested amount in msats (invoices only; sends carry the amount in
    /// the invoice itself).
    pub amount_msats: Option<u64>,
    /// Memo for invoices.
    pub memo: Option<String>,
    /// BOLT11 invoice being paid (sends only).
    pub payment_request: Option<String>,
}

/// Provider-side view of a payment, normalized from the wire format.
///
/// `status` stays a raw string here; only the orchestrator decides what a
/// given status means for the record lifecycle.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProviderPayment {
    /// Provider payment id.
    pub id: String,
    /// Raw provider status (`receiving`, `completed`, `failed`, ...).
    pub status: String,
    /// Wallet the payment belongs to, when the provider reports it.
    pub wallet_id: Option<String>,
    /// `send` or `receive`, when the provider reports it.
    pub direction: Option<String>,
    /// Provider-reported error detail, if any.
    pub error: Option<String>,
    /// Amount in msats.
    pub amount_msats: Option<u64>,
    /// Memo attached at creation.
    pub memo: Option<String>,
    /// BOLT11 payment request, once the provider has generated it.
    pub payment_request: Option<String>,
    /// Provider creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Provider update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProviderPayment {
    /// True once the provider has produced a usable invoice string.
    pub fn has_payment_request(&self) -> bool {
        self.payment_request
            .as_deref()
            .is_some_and(|r| !r.is_empty())
    }

    /// True if the provider reports failure, via status or error detail.
    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case("failed") || self.error.is_some()
    }

    /// True if the provider reports completion.
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }
}

/// Provider-side view of a wallet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderWallet {
    /// Provider wallet id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Available balance in msats.
    pub balance_msats: u64,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROVIDER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface to the upstream wallet provider.
///
/// Implementations never retry: retry policy belongs to the orchestrator,
/// which is the only component that knows whether a retry is polling or a
/// transient-failure recovery.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Submits a payment creation request.
    ///
    /// The provider commonly accepts with 202 and an empty body, in which
    /// case this returns `None` and the caller polls by the submitted id.
    async fn create_payment(&self, payment: &NewPayment) -> Result<Option<ProviderPayment>>;

    /// Fetches current payment detail by id.
    async fn get_payment(&self, id: &str) -> Result<ProviderPayment>;

    /// Lists payments in the environment, newest first.
    async fn list_payments(&self) -> Result<Vec<ProviderPayment>>;

    /// Fetches a wallet with its balances.
    async fn get_wallet(&self, wallet_id: &str) -> Result<ProviderWallet>;

    /// Lists wallets in the organization.
    async fn list_wallets(&self) -> Result<Vec<ProviderWallet>>;

    /// Creates a new wallet.
    async fn create_wallet(&self, name: &str) -> Result<ProviderWallet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_request_detection() {
        let mut payment = ProviderPayment {
            id: "p-1".into(),
            status: "receiving".into(),
            ..Default::default()
        };
        assert!(!payment.has_payment_request());

        payment.payment_request = Some(String::new());
        assert!(!payment.has_payment_request());

        payment.payment_request = Some("lnbc500u1p0x".into());
        assert!(payment.has_payment_request());
    }

    #[test]
    fn test_failure_detection() {
        let failed_status = ProviderPayment {
            status: "FAILED".into(),
            ..Default::default()
        };
        assert!(failed_status.is_failed());

        let error_only = ProviderPayment {
            status: "receiving".into(),
            error: Some("no route".into()),
            ..Default::default()
        };
        assert!(error_only.is_failed());

        let healthy = ProviderPayment {
            status: "receiving".into(),
            ..Default::default()
        };
        assert!(!healthy.is_failed());
    }

    #[test]
    fn test_completed_detection() {
        let done = ProviderPayment {
            status: "Completed".into(),
            ..Default::default()
        };
        assert!(done.is_completed());
        assert!(!done.is_failed());
    }
}
