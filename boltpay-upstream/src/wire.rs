//! Provider wire formats.
//!
//! The provider nests mutable payment data under `data` while echoing some
//! fields at the top level depending on endpoint version; normalization here
//! prefers the nested field and falls back to the top-level one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boltpay_core::{NewPayment, PaymentKind, ProviderPayment, ProviderWallet};

/// Body for `POST .../payments` creating a bolt11 invoice.
#[derive(Debug, Serialize)]
pub(crate) struct CreateInvoiceBody<'a> {
    pub payment_kind: &'static str,
    pub id: &'a str,
    pub amount_msats: u64,
    pub currency: &'static str,
    pub memo: &'a str,
    pub wallet_id: &'a str,
}

/// Body for `POST .../payments` sending a bolt11 invoice.
#[derive(Debug, Serialize)]
pub(crate) struct CreateSendBody<'a> {
    pub id: &'a str,
    pub wallet_id: &'a str,
    pub currency: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: SendData<'a>,
}

/// Nested send payload.
#[derive(Debug, Serialize)]
pub(crate) struct SendData<'a> {
    pub payment_request: &'a str,
}

pub(crate) fn creation_body(payment: &NewPayment) -> serde_json::Value {
    match payment.kind {
        PaymentKind::Invoice => serde_json::json!(CreateInvoiceBody {
            payment_kind: "bolt11",
            id: &payment.id,
            amount_msats: payment.amount_msats.unwrap_or(0),
            currency: "btc",
            memo: payment.memo.as_deref().unwrap_or("Payment"),
            wallet_id: &payment.wallet_id,
        }),
        PaymentKind::Send => serde_json::json!(CreateSendBody {
            id: &payment.id,
            wallet_id: &payment.wallet_id,
            currency: "btc",
            kind: "bolt11",
            data: SendData {
                payment_request: payment.payment_request.as_deref().unwrap_or_default(),
            },
        }),
    }
}

/// A payment as the provider returns it.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WirePayment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub wallet_id: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub payment_request: Option<String>,
    #[serde(default)]
    pub requested_amount: Option<WireAmount>,
    #[serde(default)]
    pub data: Option<WirePaymentData>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WirePaymentData {
    #[serde(default)]
    pub payment_request: Option<String>,
    #[serde(default)]
    pub amount_msats: Option<u64>,
    #[serde(default)]
    pub memo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireAmount {
    #[serde(default)]
    pub amount: u64,
}

impl From<WirePayment> for ProviderPayment {
    fn from(wire: WirePayment) -> Self {
        let data = wire.data.unwrap_or_default();
        ProviderPayment {
            id: wire.id,
            status: wire.status.or(wire.state).unwrap_or_default(),
            wallet_id: wire.wallet_id,
            direction: wire.direction,
            error: wire.error,
            amount_msats: data
                .amount_msats
                .or(wire.requested_amount.map(|a| a.amount)),
            memo: data.memo.or(wire.memo),
            payment_request: data.payment_request.or(wire.payment_request),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// Paginated payment listing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WirePaymentsPage {
    #[serde(default)]
    pub items: Vec<WirePayment>,
}

/// A wallet as the provider returns it.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireWallet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balances: Vec<WireBalance>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireBalance {
    #[serde(default)]
    pub available: Option<WireAmount>,
}

impl From<WireWallet> for ProviderWallet {
    fn from(wire: WireWallet) -> Self {
        // First balance entry carries the available amount in msats.
        let balance_msats = wire
            .balances
            .first()
            .and_then(|b| b.available.as_ref())
            .map(|a| a.amount)
            .unwrap_or(0);
        ProviderWallet {
            id: wire.id,
            name: wire.name,
            balance_msats,
        }
    }
}

/// Body for `POST .../wallets`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateWalletBody<'a> {
    pub name: &'a str,
    pub environment_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_normalization_prefers_nested_data() {
        let wire: WirePayment = serde_json::from_value(serde_json::json!({
            "id": "pay-1",
            "status": "receiving",
            "memo": "outer",
            "requested_amount": { "amount": 500_000 },
            "data": {
                "payment_request": "lnbc500u1p0x",
                "amount_msats": 123_000,
                "memo": "inner"
            }
        }))
        .unwrap();

        let payment = ProviderPayment::from(wire);
        assert_eq!(payment.amount_msats, Some(123_000));
        assert_eq!(payment.memo.as_deref(), Some("inner"));
        assert_eq!(payment.payment_request.as_deref(), Some("lnbc500u1p0x"));
    }

    #[test]
    fn test_payment_normalization_falls_back_to_top_level() {
        let wire: WirePayment = serde_json::from_value(serde_json::json!({
            "id": "pay-2",
            "state": "completed",
            "memo": "coffee",
            "requested_amount": { "amount": 500_000 }
        }))
        .unwrap();

        let payment = ProviderPayment::from(wire);
        assert_eq!(payment.status, "completed");
        assert_eq!(payment.amount_msats, Some(500_000));
        assert_eq!(payment.memo.as_deref(), Some("coffee"));
    }

    #[test]
    fn test_wallet_balance_extraction() {
        let wire: WireWallet = serde_json::from_value(serde_json::json!({
            "id": "w-1",
            "name": "Main",
            "balances": [
                { "available": { "amount": 10_500_000 } },
                { "available": { "amount": 1 } }
            ]
        }))
        .unwrap();

        let wallet = ProviderWallet::from(wire);
        assert_eq!(wallet.balance_msats, 10_500_000);
    }

    #[test]
    fn test_wallet_without_balances() {
        let wire: WireWallet =
            serde_json::from_value(serde_json::json!({ "id": "w-2", "balances": [] })).unwrap();
        assert_eq!(ProviderWallet::from(wire).balance_msats, 0);
    }

    #[test]
    fn test_invoice_creation_body_shape() {
        let body = creation_body(&NewPayment {
            id: "id-1".into(),
            wallet_id: "w-1".into(),
            kind: PaymentKind::Invoice,
            amount_msats: Some(500_000),
            memo: Some("coffee".into()),
            payment_request: None,
        });

        assert_eq!(body["payment_kind"], "bolt11");
        assert_eq!(body["amount_msats"], 500_000);
        assert_eq!(body["currency"], "btc");
        assert_eq!(body["wallet_id"], "w-1");
    }

    #[test]
    fn test_send_creation_body_shape() {
        let body = creation_body(&NewPayment {
            id: "id-2".into(),
            wallet_id: "w-1".into(),
            kind: PaymentKind::Send,
            amount_msats: None,
            memo: None,
            payment_request: Some("lnbc10u1p0x".into()),
        });

        assert_eq!(body["type"], "bolt11");
        assert_eq!(body["data"]["payment_request"], "lnbc10u1p0x");
    }
}
