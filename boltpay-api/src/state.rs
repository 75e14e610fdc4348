//! App state: engine wiring and configuration.

use std::sync::Arc;

use boltpay_cache::StatusCache;
use boltpay_core::Result;
use boltpay_engine::{EngineConfig, PaymentEngine};
use boltpay_ledger::DemoLedger;
use boltpay_limiter::RateLimiter;
use boltpay_upstream::{WalletApiClient, WalletApiConfig};

/// Server configuration.
#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    /// Upstream provider connection settings.
    pub upstream: WalletApiConfig,
    /// Surface live provisioning failures instead of demo fallbacks.
    pub strict_provisioning: bool,
}

impl ApiConfig {
    /// Loads configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            upstream: WalletApiConfig::from_env(),
            strict_provisioning: std::env::var("STRICT_PROVISIONING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// The payment engine all handlers dispatch into.
    pub engine: PaymentEngine,
}

impl AppState {
    /// Wires the engine from configuration.
    ///
    /// Credential validity is decided once here, at startup; the engine
    /// re-resolves the execution mode per request from it.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let credentials_valid = config.upstream.credentials_valid();
        let limiter = Arc::new(RateLimiter::new());
        let provider = Arc::new(WalletApiClient::with_limiter(
            config.upstream.clone(),
            limiter,
        )?);

        let engine = PaymentEngine::new(
            provider,
            Arc::new(StatusCache::new()),
            Arc::new(DemoLedger::new()),
            credentials_valid,
            EngineConfig {
                strict_provisioning: config.strict_provisioning,
                ..EngineConfig::default()
            },
        );

        Ok(Self { engine })
    }
}
