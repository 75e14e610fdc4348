//! DTOs for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boltpay_core::{PaymentKind, PaymentRecord, PaymentState};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process is serving.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Request to create an invoice.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Amount to request, in satoshis.
    pub amount_sats: u64,
    /// Optional memo embedded in the invoice.
    pub memo: Option<String>,
}

/// Request to pay a BOLT11 invoice.
#[derive(Debug, Deserialize)]
pub struct SendPaymentRequest {
    /// The BOLT11 invoice string.
    pub invoice: String,
}

/// Request to provision a wallet for a user.
#[derive(Debug, Deserialize)]
pub struct ProvisionWalletRequest {
    /// Opaque user identifier.
    pub user_ref: String,
    /// Display name for a newly created wallet.
    pub display_name: Option<String>,
}

/// Response for wallet provisioning.
#[derive(Debug, Serialize)]
pub struct ProvisionWalletResponse {
    /// The wallet id to send in `x-wallet-id` from now on.
    pub wallet_id: String,
    /// Execution mode the id resolves to (`live`, `temporary`, `demo`).
    pub mode: String,
}

/// Response for a balance query.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// The queried wallet.
    pub wallet_id: String,
    /// Available balance in satoshis.
    pub balance_sats: u64,
}

/// Response for a transaction-history query.
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    /// Completed payments, newest first.
    pub transactions: Vec<PaymentDto>,
}

/// A payment as the API reports it.
#[derive(Debug, Serialize)]
pub struct PaymentDto {
    /// Payment id, usable with `GET /api/v1/payments/:id`.
    pub id: String,
    /// `invoice` or `send`.
    pub kind: PaymentKind,
    /// Wallet the payment belongs to.
    pub wallet_id: String,
    /// Amount in satoshis.
    pub amount_sats: u64,
    /// Current lifecycle state.
    pub state: PaymentState,
    /// Memo, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// BOLT11 payment request (invoices only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_request: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// True for synthesized records.
    pub is_demo: bool,
    /// Present when a live operation degraded to a demo fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<PaymentRecord> for PaymentDto {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            wallet_id: record.wallet_ref,
            amount_sats: record.amount_sats,
            state: record.state,
            memo: record.memo,
            payment_request: record.payment_request,
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_demo: record.is_demo,
            warning: record.warning,
        }
    }
}
