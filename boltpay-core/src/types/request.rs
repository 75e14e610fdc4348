//! Validated inbound payment requests.

use serde::{Deserialize, Serialize};

use crate::error::{PayError, Result};
use crate::invoice;

/// A request handed to the payment orchestrator by the HTTP layer.
///
/// Validation happens here, before any mode resolution or network I/O, so
/// malformed input always surfaces as `InvalidRequest` and is never retried.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaymentRequest {
    /// Create an invoice to receive `amount_sats`.
    Invoice {
        /// Target wallet.
        wallet_ref: String,
        /// Amount to request, in satoshis. Must be positive.
        amount_sats: u64,
        /// Optional memo embedded in the invoice.
        memo: Option<String>,
    },
    /// Pay someone else's BOLT11 invoice.
    Send {
        /// Paying wallet.
        wallet_ref: String,
        /// The BOLT11 invoice string.
        invoice: String,
    },
}

impl PaymentRequest {
    /// Wallet the request targets.
    pub fn wallet_ref(&self) -> &str {
        match self {
            PaymentRequest::Invoice { wallet_ref, .. } => wallet_ref,
            PaymentRequest::Send { wallet_ref, .. } => wallet_ref,
        }
    }

    /// Validates structure and amounts.
    pub fn validate(&self) -> Result<()> {
        match self {
            PaymentRequest::Invoice {
                wallet_ref,
                amount_sats,
                ..
            } => {
                if wallet_ref.trim().is_empty() {
                    return Err(PayError::InvalidRequest(
                        "No wallet associated with request".into(),
                    ));
                }
                if *amount_sats == 0 {
                    return Err(PayError::InvalidRequest("Valid amount is required".into()));
                }
                Ok(())
            }
            PaymentRequest::Send {
                wallet_ref,
                invoice: invoice_str,
            } => {
                if wallet_ref.trim().is_empty() {
                    return Err(PayError::InvalidRequest(
                        "No wallet associated with request".into(),
                    ));
                }
                if invoice_str.trim().is_empty() {
                    return Err(PayError::InvalidRequest("Invoice is required".into()));
                }
                if !invoice::is_lightning_invoice(invoice_str) {
                    return Err(PayError::InvalidRequest(
                        "Invalid Lightning invoice format".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}
