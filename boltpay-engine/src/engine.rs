//! The payment orchestrator.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use boltpay_cache::StatusCache;
use boltpay_core::constants::{
    DEMO_BALANCE_SATS, DEMO_PAYMENT_PREFIX, DEMO_SEND_PREFIX, DEMO_WALLET_PREFIX,
    TEMP_WALLET_PREFIX,
};
use boltpay_core::{
    msats_to_sats, sats_to_msats, NewPayment, PayError, PaymentKind, PaymentRecord,
    PaymentRequest, PaymentState, ProviderPayment, Result, WalletMode, WalletProvider,
};
use boltpay_ledger::DemoLedger;

use crate::config::EngineConfig;
use crate::{demo, mode, poll};

/// Warning attached to records synthesized because a live path failed.
pub const FALLBACK_WARNING: &str = "Using demo mode due to API configuration issues";

/// Drives every payment operation, resolving an execution mode per request.
///
/// Holds the provider behind a trait object so tests can substitute a
/// scripted mock, plus the two record stores: the status cache for live
/// payments and the demo ledger for synthesized ones.
pub struct PaymentEngine {
    provider: Arc<dyn WalletProvider>,
    cache: Arc<StatusCache>,
    ledger: Arc<DemoLedger>,
    credentials_valid: bool,
    config: EngineConfig,
}

impl PaymentEngine {
    /// Creates an engine.
    ///
    /// `credentials_valid` reflects the provider configuration at startup;
    /// when false, every untagged wallet resolves to demo mode.
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        cache: Arc<StatusCache>,
        ledger: Arc<DemoLedger>,
        credentials_valid: bool,
        config: EngineConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            ledger,
            credentials_valid,
            config,
        }
    }

    /// The demo ledger backing this engine, for sweep wiring.
    pub fn ledger(&self) -> Arc<DemoLedger> {
        Arc::clone(&self.ledger)
    }

    /// Resolves the execution mode for a wallet reference.
    pub fn mode(&self, wallet_ref: &str) -> WalletMode {
        mode::resolve(wallet_ref, self.credentials_valid)
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // INVOICE CREATION
    // ═══════════════════════════════════════════════════════════════════════════════

    /// Creates an invoice to receive `amount_sats`.
    ///
    /// Live creation submits upstream and polls until the BOLT11 string
    /// materializes. If polling fails or times out, the caller still gets a
    /// usable record: a synthesized invoice carrying [`FALLBACK_WARNING`],
    /// unless strict provisioning is configured.
    #[instrument(skip(self, memo))]
    pub async fn create_invoice(
        &self,
        wallet_ref: &str,
        amount_sats: u64,
        memo: Option<String>,
    ) -> Result<PaymentRecord> {
        PaymentRequest::Invoice {
            wallet_ref: wallet_ref.into(),
            amount_sats,
            memo: memo.clone(),
        }
        .validate()?;

        let wallet_mode = self.mode(wallet_ref);
        if wallet_mode.is_synthetic() {
            debug!(wallet_ref, mode = wallet_mode.label(), "Synthesizing invoice");
            let record = demo::synth_invoice(wallet_ref, amount_sats, memo);
            self.ledger.create(record.clone());
            return Ok(record);
        }

        match self.live_invoice(wallet_ref, amount_sats, memo.clone()).await {
            Ok(detail) => {
                let mut record = record_from_provider(detail, wallet_ref);
                if record.amount_sats == 0 {
                    record.amount_sats = amount_sats;
                }
                if record.memo.is_none() {
                    record.memo = memo;
                }
                info!(id = %record.id, "Live invoice created");
                Ok(record)
            }
            Err(
                err @ (PayError::PaymentCreationFailed(_)
                | PayError::PaymentCreationTimeout { .. }),
            ) => {
                if self.config.strict_provisioning {
                    return Err(err);
                }
                warn!(wallet_ref, %err, "Live invoice creation failed; falling back to demo record");
                let record = demo::synth_invoice(wallet_ref, amount_sats, memo)
                    .with_warning(FALLBACK_WARNING);
                self.ledger.create(record.clone());
                Ok(record)
            }
            Err(err) => Err(err),
        }
    }

    async fn live_invoice(
        &self,
        wallet_ref: &str,
        amount_sats: u64,
        memo: Option<String>,
    ) -> Result<ProviderPayment> {
        let new_payment = NewPayment {
            id: Uuid::new_v4().to_string(),
            wallet_id: wallet_ref.into(),
            kind: PaymentKind::Invoice,
            amount_msats: Some(sats_to_msats(amount_sats)),
            memo,
            payment_request: None,
        };

        // Creation is usually accepted asynchronously with no body; the
        // submitted id is the polling key either way.
        match self.provider.create_payment(&new_payment).await? {
            Some(detail) if detail.has_payment_request() => Ok(detail),
            _ => poll::poll_for_invoice(self.provider.as_ref(), &new_payment.id, &self.config).await,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // OUTBOUND SEND
    // ═══════════════════════════════════════════════════════════════════════════════

    /// Pays a BOLT11 invoice from the given wallet.
    ///
    /// The live path submits once and makes exactly one follow-up status
    /// fetch; it never polls. A failed follow-up still yields a pending
    /// record, leaving resolution to later status queries.
    #[instrument(skip(self, invoice_str))]
    pub async fn send_payment(&self, wallet_ref: &str, invoice_str: &str) -> Result<PaymentRecord> {
        PaymentRequest::Send {
            wallet_ref: wallet_ref.into(),
            invoice: invoice_str.into(),
        }
        .validate()?;

        let wallet_mode = self.mode(wallet_ref);
        if wallet_mode.is_synthetic() {
            debug!(wallet_ref, mode = wallet_mode.label(), "Synthesizing send");
            let record = demo::synth_send(wallet_ref, invoice_str, wallet_mode);
            self.ledger.create(record.clone());
            return Ok(record);
        }

        let new_payment = NewPayment {
            id: Uuid::new_v4().to_string(),
            wallet_id: wallet_ref.into(),
            kind: PaymentKind::Send,
            amount_msats: None,
            memo: None,
            payment_request: Some(invoice_str.into()),
        };
        self.provider.create_payment(&new_payment).await?;

        match self.provider.get_payment(&new_payment.id).await {
            Ok(detail) => {
                let mut record = record_from_provider(detail, wallet_ref);
                record.kind = PaymentKind::Send;
                Ok(record)
            }
            Err(err) => {
                warn!(id = %new_payment.id, %err, "Send accepted but status fetch failed; reporting pending");
                Ok(PaymentRecord::new(
                    new_payment.id,
                    PaymentKind::Send,
                    wallet_ref,
                    0,
                ))
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════════

    /// Fetches the current state of a payment by id.
    ///
    /// Synthesized ids resolve from the demo ledger and never touch the
    /// provider. For live ids, a cached terminal record short-circuits the
    /// upstream call entirely.
    #[instrument(skip(self))]
    pub async fn get_status(&self, id: &str) -> Result<PaymentRecord> {
        if id.starts_with(DEMO_PAYMENT_PREFIX) || id.starts_with(DEMO_SEND_PREFIX) {
            return self
                .ledger
                .get(id)
                .ok_or_else(|| PayError::NotFound(format!("Payment {id} not found")));
        }

        if let Some(hit) = self.cache.get_terminal(id) {
            debug!(id, "Serving terminal status from cache");
            return Ok(hit);
        }

        let detail = match self.provider.get_payment(id).await {
            Ok(detail) => detail,
            Err(PayError::Upstream { status: 404, .. }) => {
                return Err(PayError::NotFound(format!("Payment {id} not found")));
            }
            Err(err) => return Err(err),
        };

        let record = record_from_provider(detail, "");
        self.cache.put(record.clone());
        Ok(record)
    }

    /// Lists completed payments for a wallet, newest first.
    #[instrument(skip(self))]
    pub async fn list_transactions(&self, wallet_ref: &str) -> Result<Vec<PaymentRecord>> {
        if self.mode(wallet_ref).is_synthetic() {
            return Ok(self
                .ledger
                .list_completed()
                .into_iter()
                .filter(|r| r.wallet_ref == wallet_ref)
                .collect());
        }

        let mut records: Vec<PaymentRecord> = self
            .provider
            .list_payments()
            .await?
            .into_iter()
            .filter(|p| p.is_completed())
            .filter(|p| p.wallet_id.as_deref().map_or(true, |w| w == wallet_ref))
            .map(|p| record_from_provider(p, wallet_ref))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Returns the wallet's available balance in satoshis.
    #[instrument(skip(self))]
    pub async fn get_balance(&self, wallet_ref: &str) -> Result<u64> {
        if self.mode(wallet_ref).is_synthetic() {
            return Ok(DEMO_BALANCE_SATS);
        }
        let wallet = self.provider.get_wallet(wallet_ref).await?;
        Ok(msats_to_sats(wallet.balance_msats))
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // PROVISIONING
    // ═══════════════════════════════════════════════════════════════════════════════

    /// Resolves a wallet id for a user, provisioning one if needed.
    ///
    /// Never fails: with valid credentials this adopts the organization's
    /// first wallet or creates one; any upstream failure degrades to a
    /// `temp-wallet-` id, and missing credentials to a `demo-wallet-` id.
    /// The tag persists on the returned id, so a failed provisioning keeps
    /// the wallet on the synthetic path for its lifetime.
    #[instrument(skip(self))]
    pub async fn provision_wallet(&self, user_ref: &str, display_name: &str) -> String {
        if !self.credentials_valid {
            return format!("{DEMO_WALLET_PREFIX}{user_ref}");
        }

        let provisioned = match self.provider.list_wallets().await {
            Ok(wallets) => match wallets.into_iter().next() {
                Some(wallet) => Ok(wallet.id),
                None => self
                    .provider
                    .create_wallet(display_name)
                    .await
                    .map(|w| w.id),
            },
            Err(err) => Err(err),
        };

        match provisioned {
            Ok(id) => {
                info!(user_ref, wallet_id = %id, "Provisioned live wallet");
                id
            }
            Err(err) => {
                warn!(user_ref, %err, "Wallet provisioning failed; issuing temporary wallet");
                format!("{TEMP_WALLET_PREFIX}{user_ref}")
            }
        }
    }
}

/// Normalizes a provider payment into the engine's record shape.
///
/// Amounts floor-divide from msats; an absent amount becomes zero and the
/// caller supplies a better fallback where it knows one.
fn record_from_provider(detail: ProviderPayment, fallback_wallet: &str) -> PaymentRecord {
    let kind = match detail.direction.as_deref() {
        Some("send") => PaymentKind::Send,
        _ => PaymentKind::Invoice,
    };
    let wallet_ref = detail
        .wallet_id
        .unwrap_or_else(|| fallback_wallet.to_string());
    let amount_sats = detail.amount_msats.map(msats_to_sats).unwrap_or(0);

    let mut record =
        PaymentRecord::new(detail.id, kind, wallet_ref, amount_sats).with_memo(detail.memo);
    if let Some(request) = detail.payment_request {
        record = record.with_payment_request(request);
    }
    record.state = PaymentState::from_upstream(&detail.status);
    if let Some(created) = detail.created_at {
        record.created_at = created;
        record.updated_at = created;
    }
    if let Some(updated) = detail.updated_at {
        record.updated_at = updated;
    }
    record
}
