//! # Boltpay Demo Ledger
//!
//! In-memory store of synthesized invoices/payments, serving balance, history,
//! and status queries consistently in demo mode. Records persist for the
//! process lifetime, bounded by the expiry sweep rather than deletion.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod ledger;
mod sweep;

pub use ledger::DemoLedger;
pub use sweep::spawn_expiry_sweeper;
