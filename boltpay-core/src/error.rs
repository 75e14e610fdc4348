//! Error types for boltpay.
//!
//! This module provides the error hierarchy for the payment engine using
//! `thiserror`. All errors include context and are designed to be actionable;
//! the HTTP layer maps them onto status codes without inspecting messages.

use thiserror::Error;

/// Result type alias using `PayError`.
pub type Result<T> = std::result::Result<T, PayError>;

/// Main error type for all boltpay operations.
#[derive(Debug, Error)]
pub enum PayError {
    // ═══════════════════════════════════════════════════════════════════════════
    // LOCAL ADMISSION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The local sliding-window limiter rejected the call before any I/O.
    #[error("Rate limit exceeded for {endpoint}. Try again in {retry_after_secs} seconds.")]
    RateLimitExceeded {
        /// Endpoint key whose window is saturated.
        endpoint: String,
        /// Whole seconds until the oldest window entry ages out.
        retry_after_secs: u64,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Non-2xx response from the wallet provider.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status returned by the provider.
        status: u16,
        /// Best-effort message extracted from the response body.
        message: String,
    },

    /// Transport failure before any HTTP status was received.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Upstream call exceeded the fixed per-request timeout.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // PAYMENT LIFECYCLE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    // These two are recovered locally via demo-mode fallback during invoice
    // creation; they only surface to callers through the warning flag.

    /// The provider reported the payment as failed during creation polling.
    #[error("Payment creation failed: {0}")]
    PaymentCreationFailed(String),

    /// The poll attempt ceiling was exhausted without a usable invoice.
    #[error("Invoice generation timeout after {attempts} attempts")]
    PaymentCreationTimeout {
        /// Number of poll attempts made.
        attempts: u32,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // REQUEST VALIDATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed amount, invoice, or missing wallet. Never retried.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown payment id on a status query.
    #[error("Payment not found: {0}")]
    NotFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & CONFIG
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PayError {
    /// Returns true if a poll loop may keep going after this error.
    ///
    /// Non-recoverable errors (not-found, server errors) promote a polling
    /// invoice creation straight to failed without exhausting the ceiling.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PayError::Upstream { status, .. } => *status != 404 && *status < 500,
            PayError::Http(_)
            | PayError::ConnectionTimeout(_)
            | PayError::RateLimitExceeded { .. } => true,
            _ => false,
        }
    }

    /// Returns true if this error is the caller's fault and must surface
    /// immediately.
    pub fn is_validation(&self) -> bool {
        matches!(self, PayError::InvalidRequest(_))
    }

    /// Retry-after hint in seconds, when the error carries one.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            PayError::RateLimitExceeded {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PayError::RateLimitExceeded {
            endpoint: "/payments".into(),
            retry_after_secs: 42,
        };
        assert!(err.to_string().contains("/payments"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_upstream_recoverability() {
        let transient = PayError::Upstream {
            status: 429,
            message: "slow down".into(),
        };
        assert!(transient.is_recoverable());

        let not_found = PayError::Upstream {
            status: 404,
            message: "no such payment".into(),
        };
        assert!(!not_found.is_recoverable());

        let server = PayError::Upstream {
            status: 500,
            message: "boom".into(),
        };
        assert!(!server.is_recoverable());
    }

    #[test]
    fn test_transport_errors_are_recoverable() {
        assert!(PayError::Http("reset".into()).is_recoverable());
        assert!(PayError::ConnectionTimeout("10s".into()).is_recoverable());
        assert!(!PayError::InvalidRequest("bad".into()).is_recoverable());
    }

    #[test]
    fn test_retry_after_hint() {
        let err = PayError::RateLimitExceeded {
            endpoint: "/wallets".into(),
            retry_after_secs: 7,
        };
        assert_eq!(err.retry_after(), Some(7));
        assert_eq!(PayError::NotFound("x".into()).retry_after(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(PayError::from);
        assert!(matches!(result, Err(PayError::Json(_))));
    }
}
