//! # Boltpay Status Cache
//!
//! Short-lived memoization of payment states, suppressing duplicate upstream
//! polling from repeated client status checks.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod cache;

pub use cache::StatusCache;
