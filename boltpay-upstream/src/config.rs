//! Wallet provider API configuration.

use serde::{Deserialize, Serialize};

use boltpay_core::constants::UPSTREAM_TIMEOUT_SECS;

/// Default provider API base URL.
pub const DEFAULT_API_URL: &str = "https://backend.voltage.cloud/api/v1";

// Dashboard-seeded .env templates ship these literal values; treating them as
// configured credentials would send garbage upstream.
const PLACEHOLDER_FRAGMENTS: [&str; 3] = ["your_actual_", "your-voltage-", "your-org-id"];

/// Configuration for the wallet provider client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletApiConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Static API key sent as `X-Api-Key`.
    pub api_key: Option<String>,
    /// Organization id in the provider's hierarchy.
    pub org_id: Option<String>,
    /// Environment id under the organization.
    pub env_id: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for WalletApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            api_key: None,
            org_id: None,
            env_id: None,
            timeout_seconds: UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl WalletApiConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads `WALLET_API_URL`, `WALLET_API_KEY`, `WALLET_ORG_ID`, and
    /// `WALLET_ENV_ID`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WALLET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            api_key: std::env::var("WALLET_API_KEY").ok(),
            org_id: std::env::var("WALLET_ORG_ID").ok(),
            env_id: std::env::var("WALLET_ENV_ID").ok(),
            timeout_seconds: UPSTREAM_TIMEOUT_SECS,
        }
    }

    /// True when all three credentials are present and none is a template
    /// placeholder. Drives the demo-mode decision in the mode resolver.
    pub fn credentials_valid(&self) -> bool {
        [&self.api_key, &self.org_id, &self.env_id]
            .iter()
            .all(|v| v.as_deref().is_some_and(is_real_value))
    }

    /// Path to the organization's wallet collection.
    pub fn wallets_path(&self) -> String {
        format!(
            "/organizations/{}/wallets",
            self.org_id.as_deref().unwrap_or_default()
        )
    }

    /// Path to the environment's payment collection.
    pub fn payments_path(&self) -> String {
        format!(
            "/organizations/{}/environments/{}/payments",
            self.org_id.as_deref().unwrap_or_default(),
            self.env_id.as_deref().unwrap_or_default()
        )
    }
}

fn is_real_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && !PLACEHOLDER_FRAGMENTS
            .iter()
            .any(|fragment| trimmed.contains(fragment))
}
