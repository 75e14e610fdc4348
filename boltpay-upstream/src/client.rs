//! HTTP client for the wallet provider API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument, warn};

use boltpay_core::error::{PayError, Result};
use boltpay_core::{NewPayment, ProviderPayment, ProviderWallet, WalletProvider};
use boltpay_limiter::RateLimiter;

use crate::config::WalletApiConfig;
use crate::wire;

/// Client for the wallet provider's REST API.
///
/// Implements [`WalletProvider`]. A shared [`RateLimiter`] guards every
/// request; a rejection surfaces as `RateLimitExceeded` before any I/O.
pub struct WalletApiClient {
    config: WalletApiConfig,
    limiter: Arc<RateLimiter>,
    http: reqwest::Client,
}

impl WalletApiClient {
    /// Creates a client with its own rate limiter.
    pub fn new(config: WalletApiConfig) -> Result<Self> {
        Self::with_limiter(config, Arc::new(RateLimiter::new()))
    }

    /// Creates a client sharing an existing rate limiter.
    pub fn with_limiter(config: WalletApiConfig, limiter: Arc<RateLimiter>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PayError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            limiter,
            http,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &WalletApiConfig {
        &self.config
    }

    /// Performs one rate-limited request and returns the parsed body.
    ///
    /// `None` means the provider accepted without a body (202-style).
    #[instrument(skip(self, body), fields(method = %method))]
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<serde_json::Value>> {
        self.limiter.admit(path)?;

        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut request = self
            .http
            .request(method, &url)
            .header("X-Api-Key", self.config.api_key.as_deref().unwrap_or_default())
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!(url, "Upstream request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                PayError::ConnectionTimeout(e.to_string())
            } else {
                PayError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PayError::Http(e.to_string()))?;

        if !status.is_success() {
            let message = extract_message(&text, status.as_u16());
            warn!(status = status.as_u16(), %message, "Upstream call failed");
            return Err(PayError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(None);
        }

        let json = serde_json::from_str(&text)?;
        Ok(Some(json))
    }

    fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
        serde_json::from_value(value).map_err(PayError::from)
    }
}

/// Best-effort error message extraction: `message` field, then `error`,
/// then the raw body, then the bare status code.
fn extract_message(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Upstream request failed with status {status}")
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl WalletProvider for WalletApiClient {
    async fn create_payment(&self, payment: &NewPayment) -> Result<Option<ProviderPayment>> {
        let body = wire::creation_body(payment);
        let response = self
            .call(Method::POST, &self.config.payments_path(), Some(body))
            .await?;

        match response {
            // 202 with an empty body: the caller polls by the submitted id.
            None => Ok(None),
            Some(json) => {
                let wire: wire::WirePayment = Self::parse(json)?;
                Ok(Some(wire.into()))
            }
        }
    }

    async fn get_payment(&self, id: &str) -> Result<ProviderPayment> {
        let path = format!("{}/{id}", self.config.payments_path());
        let json = self
            .call(Method::GET, &path, None)
            .await?
            .ok_or_else(|| PayError::NotFound(id.to_string()))?;
        let wire: wire::WirePayment = Self::parse(json)?;
        Ok(wire.into())
    }

    async fn list_payments(&self) -> Result<Vec<ProviderPayment>> {
        let json = self
            .call(Method::GET, &self.config.payments_path(), None)
            .await?
            .unwrap_or_default();
        let page: wire::WirePaymentsPage = Self::parse(json)?;
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    async fn get_wallet(&self, wallet_id: &str) -> Result<ProviderWallet> {
        let path = format!("{}/{wallet_id}", self.config.wallets_path());
        let json = self
            .call(Method::GET, &path, None)
            .await?
            .ok_or_else(|| PayError::NotFound(wallet_id.to_string()))?;
        let wire: wire::WireWallet = Self::parse(json)?;
        Ok(wire.into())
    }

    async fn list_wallets(&self) -> Result<Vec<ProviderWallet>> {
        let json = self
            .call(Method::GET, &self.config.wallets_path(), None)
            .await?
            .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));
        let wallets: Vec<wire::WireWallet> = Self::parse(json)?;
        Ok(wallets.into_iter().map(Into::into).collect())
    }

    async fn create_wallet(&self, name: &str) -> Result<ProviderWallet> {
        let body = serde_json::json!(wire::CreateWalletBody {
            name,
            environment_id: self.config.env_id.as_deref().unwrap_or_default(),
        });
        let json = self
            .call(Method::POST, &self.config.wallets_path(), Some(body))
            .await?
            .ok_or_else(|| PayError::Internal("wallet creation returned no body".into()))?;
        let wire: wire::WireWallet = Self::parse(json)?;
        Ok(wire.into())
    }
}
