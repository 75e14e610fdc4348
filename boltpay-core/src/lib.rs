//! # Boltpay Core
//!
//! Core types, errors, and traits for the boltpay Lightning payment engine.
//!
//! This crate provides the foundational building blocks used by all other
//! boltpay crates:
//!
//! - **Types**: Domain models for payments, wallets, and requests
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Protocol constants and tuning values
//! - **Traits**: The wallet provider seam used by the orchestrator and tests
//! - **Invoice parsing**: BOLT11 prefix/amount extraction
//!
//! ## Example
//!
//! ```rust
//! use boltpay_core::{PaymentRecord, PaymentKind, PaymentState};
//!
//! let record = PaymentRecord::new("pay-1", PaymentKind::Invoice, "demo-wallet-1", 500);
//! assert_eq!(record.state, PaymentState::Pending);
//! let json = serde_json::to_string(&record).unwrap();
//! assert!(json.contains("pending"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod amount;
pub mod constants;
pub mod error;
pub mod invoice;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use amount::{msats_to_sats, sats_to_msats};
pub use constants::*;
pub use error::{PayError, Result};
pub use traits::*;
pub use types::*;
