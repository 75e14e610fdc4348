//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// Name of the header callers use to identify their wallet.
pub const WALLET_HEADER: &str = "x-wallet-id";

fn wallet_ref(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(WALLET_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{WALLET_HEADER} header is required")))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/v1/wallet/provision
pub async fn provision_wallet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProvisionWalletRequest>,
) -> Result<Json<ProvisionWalletResponse>> {
    if req.user_ref.trim().is_empty() {
        return Err(ApiError::bad_request("user_ref is required"));
    }

    let display_name = req
        .display_name
        .unwrap_or_else(|| format!("{} wallet", req.user_ref));
    let wallet_id = state.engine.provision_wallet(&req.user_ref, &display_name).await;
    let mode = state.engine.mode(&wallet_id).label().to_lowercase();

    info!(user_ref = %req.user_ref, %wallet_id, %mode, "Wallet provisioned");

    Ok(Json(ProvisionWalletResponse { wallet_id, mode }))
}

/// GET /api/v1/wallet/balance
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BalanceResponse>> {
    let wallet = wallet_ref(&headers)?;
    let balance_sats = state.engine.get_balance(wallet).await?;

    Ok(Json(BalanceResponse {
        wallet_id: wallet.to_string(),
        balance_sats,
    }))
}

/// GET /api/v1/wallet/transactions
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TransactionsResponse>> {
    let wallet = wallet_ref(&headers)?;
    let records = state.engine.list_transactions(wallet).await?;

    Ok(Json(TransactionsResponse {
        transactions: records.into_iter().map(PaymentDto::from).collect(),
    }))
}

/// POST /api/v1/payments/receive
pub async fn create_invoice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateInvoiceRequest>,
) -> Result<Json<PaymentDto>> {
    let wallet = wallet_ref(&headers)?;
    let record = state
        .engine
        .create_invoice(wallet, req.amount_sats, req.memo)
        .await?;

    info!(id = %record.id, amount_sats = record.amount_sats, "Invoice created");

    Ok(Json(record.into()))
}

/// POST /api/v1/payments/send
pub async fn send_payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SendPaymentRequest>,
) -> Result<Json<PaymentDto>> {
    let wallet = wallet_ref(&headers)?;
    let record = state.engine.send_payment(wallet, &req.invoice).await?;

    info!(id = %record.id, state = ?record.state, "Payment submitted");

    Ok(Json(record.into()))
}

/// GET /api/v1/payments/:id
pub async fn get_payment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PaymentDto>> {
    let record = state.engine.get_status(&id).await?;
    Ok(Json(record.into()))
}
