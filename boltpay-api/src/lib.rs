//! # Boltpay API Server
//!
//! REST surface over the payment engine. Callers identify their wallet with
//! an `x-wallet-id` header; the engine decides per request whether that
//! wallet runs live or in demo mode.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `POST /api/v1/wallet/provision` - Resolve or create a wallet for a user
//! - `GET /api/v1/wallet/balance` - Available balance in sats
//! - `GET /api/v1/wallet/transactions` - Completed payments, newest first
//! - `POST /api/v1/payments/receive` - Create an invoice
//! - `POST /api/v1/payments/send` - Pay a BOLT11 invoice
//! - `GET /api/v1/payments/:id` - Current payment status
//!
//! ## Example
//!
//! ```rust,ignore
//! use boltpay_api::{ApiConfig, ApiServer};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use boltpay_core::constants::{DEMO_RETENTION_SECS, SWEEP_INTERVAL_SECS};
use boltpay_core::Result;
use boltpay_ledger::spawn_expiry_sweeper;

/// API server for boltpay.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes and middleware configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    ///
    /// Also starts the demo ledger's expiry sweeper, which runs for the
    /// lifetime of the process.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        spawn_expiry_sweeper(
            self.state.engine.ledger(),
            Duration::from_secs(SWEEP_INTERVAL_SECS),
            Duration::from_secs(DEMO_RETENTION_SECS),
        );

        info!("Boltpay API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server(port: u16) -> std::io::Result<()> {
    let config = ApiConfig::from_env();
    let server = ApiServer::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    server.run(([0, 0, 0, 0], port)).await
}
