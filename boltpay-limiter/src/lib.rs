//! # Boltpay Rate Limiter
//!
//! Per-endpoint sliding-window admission control guarding all upstream calls.
//!
//! This is advisory local throttling, not a guarantee against the provider's
//! own limits — upstream failures still propagate normally.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod limiter;

pub use limiter::{LimiterConfig, RateLimiter};
