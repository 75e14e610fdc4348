//! # Boltpay Upstream Client
//!
//! Typed request/response wrapper around the wallet provider's HTTP API.
//!
//! Every call passes through the rate limiter first — a rejection fails fast
//! with no network I/O. Non-2xx responses and transport failures are
//! normalized into `PayError::Upstream` / `PayError::Http`, preferring the
//! body's `message` field, then `error`, then the raw text. The client never
//! retries; retry policy lives in the orchestrator.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod client;
mod config;
mod wire;

pub use client::WalletApiClient;
pub use config::WalletApiConfig;
