//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Wallet
        .route("/api/v1/wallet/provision", post(handlers::provision_wallet))
        .route("/api/v1/wallet/balance", get(handlers::get_balance))
        .route(
            "/api/v1/wallet/transactions",
            get(handlers::list_transactions),
        )
        // Payments
        .route("/api/v1/payments/receive", post(handlers::create_invoice))
        .route("/api/v1/payments/send", post(handlers::send_payment))
        .route("/api/v1/payments/:id", get(handlers::get_payment_status))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ApiConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    // Default config has no credentials, so every wallet resolves to demo
    // mode and no test touches the network.
    fn test_app() -> Router {
        let state = Arc::new(AppState::new(ApiConfig::default()).unwrap());
        create_router(state)
    }

    fn json_request(method: &str, uri: &str, wallet: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(wallet) = wallet {
            builder = builder.header("x-wallet-id", wallet);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_provision_without_credentials_yields_demo_wallet() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/v1/wallet/provision",
                None,
                r#"{"user_ref":"alice"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["wallet_id"], "demo-wallet-alice");
        assert_eq!(json["mode"], "demo");
    }

    #[tokio::test]
    async fn test_create_invoice_demo() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/v1/payments/receive",
                Some("demo-wallet-alice"),
                r#"{"amount_sats":500,"memo":"coffee"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["amount_sats"], 500);
        assert_eq!(json["state"], "pending");
        assert_eq!(json["is_demo"], true);
        assert!(json["payment_request"]
            .as_str()
            .is_some_and(|r| r.starts_with("lnbc500")));
    }

    #[tokio::test]
    async fn test_missing_wallet_header_is_bad_request() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/v1/payments/receive",
                None,
                r#"{"amount_sats":500}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/v1/payments/receive",
                Some("demo-wallet-alice"),
                r#"{"amount_sats":0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_send_rejects_invalid_invoice() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/v1/payments/send",
                Some("demo-wallet-alice"),
                r#"{"invoice":"bc1qonchain"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_send_demo_completes() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/v1/payments/send",
                Some("demo-wallet-alice"),
                r#"{"invoice":"lnbc10u1p0xyz"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["state"], "completed");
        assert_eq!(json["amount_sats"], 1000);
    }

    #[tokio::test]
    async fn test_unknown_payment_is_not_found() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/payments/demo-payment-000nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_balance_demo() {
        let response = test_app()
            .oneshot(json_request(
                "GET",
                "/api/v1/wallet/balance",
                Some("demo-wallet-alice"),
                "",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["balance_sats"], 10_000);
    }

    #[tokio::test]
    async fn test_invoice_then_status_roundtrip() {
        let app = test_app();

        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/payments/receive",
                Some("demo-wallet-alice"),
                r#"{"amount_sats":250}"#,
            ))
            .await
            .unwrap();
        let created = body_json(created).await;
        let id = created["id"].as_str().unwrap();

        let status = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/payments/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(status.status(), StatusCode::OK);
        let json = body_json(status).await;
        assert_eq!(json["id"], id);
        assert_eq!(json["state"], "pending");
    }
}
