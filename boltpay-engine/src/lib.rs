//! # Boltpay Engine
//!
//! The payment lifecycle orchestrator. Every inbound operation flows through
//! [`PaymentEngine`], which resolves an execution mode per request and then
//! runs the live provider path or the local synthesis path:
//!
//! - **Mode resolution**: `demo-wallet-*` and `temp-wallet-*` ids, or missing
//!   provider credentials, route to local synthesis; everything else is live.
//! - **Invoice creation**: submit to the provider, then poll with capped
//!   exponential backoff until the BOLT11 string materializes. Exhaustion or
//!   failure falls back to a synthesized invoice flagged with a warning.
//! - **Status queries**: terminal results are served from the status cache
//!   without touching the provider.
//! - **Demo records**: live in the demo ledger and expire on a background
//!   sweep.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use boltpay_cache::StatusCache;
//! use boltpay_engine::{EngineConfig, PaymentEngine};
//! use boltpay_ledger::DemoLedger;
//! # fn provider() -> Arc<dyn boltpay_core::WalletProvider> { unimplemented!() }
//!
//! let engine = PaymentEngine::new(
//!     provider(),
//!     Arc::new(StatusCache::new()),
//!     Arc::new(DemoLedger::new()),
//!     true,
//!     EngineConfig::default(),
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod config;
mod demo;
mod engine;
pub mod mode;
mod poll;

#[cfg(test)]
mod testutil;

pub use config::EngineConfig;
pub use engine::{PaymentEngine, FALLBACK_WARNING};
pub use mode::resolve;
