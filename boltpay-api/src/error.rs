//! API error handling.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use boltpay_core::PayError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
    retry_after_secs: Option<u64>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
            retry_after_secs: None,
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// Rate limit error; carries the `Retry-After` header value.
    pub fn rate_limited(message: impl Into<String>, retry_after_secs: u64) -> Self {
        let mut err = Self::new(StatusCode::TOO_MANY_REQUESTS, message, "RATE_LIMITED");
        err.retry_after_secs = Some(retry_after_secs);
        err
    }

    /// Upstream provider failure.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        let mut response = (self.status, Json(body)).into_response();
        if let Some(secs) = self.retry_after_secs {
            if let Ok(value) = secs.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<PayError> for ApiError {
    fn from(err: PayError) -> Self {
        match &err {
            PayError::InvalidRequest(_) => ApiError::bad_request(err.to_string()),
            PayError::NotFound(_) => ApiError::not_found(err.to_string()),
            PayError::RateLimitExceeded {
                retry_after_secs, ..
            } => ApiError::rate_limited(err.to_string(), *retry_after_secs),
            PayError::Upstream { .. }
            | PayError::Http(_)
            | PayError::ConnectionTimeout(_)
            | PayError::PaymentCreationFailed(_)
            | PayError::PaymentCreationTimeout { .. } => ApiError::upstream(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_maps_to_429_with_retry_after() {
        let api_err: ApiError = PayError::RateLimitExceeded {
            endpoint: "/payments".into(),
            retry_after_secs: 30,
        }
        .into();

        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "30"
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_err: ApiError = PayError::NotFound("payment p-1".into()).into();
        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_maps_to_502() {
        let api_err: ApiError = PayError::Upstream {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(api_err.status, StatusCode::BAD_GATEWAY);
    }
}
