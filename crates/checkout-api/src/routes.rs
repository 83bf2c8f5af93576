//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::site::ASSETS_ROUTE;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - API:
///   - POST   /api/payments/intent - Create or update a payment intent
///   - DELETE /api/payments/intent - Cancel a payment intent
///   - GET    /api/config          - Public runtime configuration
///
/// - Health:
///   - GET /health, GET /
///
/// - Static:
///   - GET /assets/* - Stylesheets and other pipeline assets
///   - anything else falls through to the static directory
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/payments/intent",
            post(handlers::upsert_intent).delete(handlers::cancel_intent),
        )
        .route("/config", get(handlers::public_config));

    let assets = ServeDir::new(&state.site.assets_dir);
    let static_files = ServeDir::new(&state.site.static_dir);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        .nest_service(ASSETS_ROUTE, assets)
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::site::SiteConfig;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use checkout_core::{
        CheckoutError, CheckoutResult, Currency, IntentGateway, IntentParams, IntentStatus,
        PaymentIntent,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create { amount: i64, currency: Currency, automatic: bool },
        Update { id: String, amount: i64, currency: Currency },
        Cancel { id: String },
    }

    /// In-memory gateway that records every call and replays a scripted outcome
    struct RecordingGateway {
        calls: Mutex<Vec<Call>>,
        cancel_outcome: fn() -> CheckoutResult<IntentStatus>,
        upsert_failure: Option<fn() -> CheckoutError>,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                cancel_outcome: || Ok(IntentStatus::Canceled),
                upsert_failure: None,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn intent(id: &str, amount: i64, status: IntentStatus) -> PaymentIntent {
            PaymentIntent {
                id: id.to_string(),
                amount,
                currency: "usd".to_string(),
                client_secret: Some(format!("{}_secret_y", id)),
                status,
                created_at: Default::default(),
            }
        }
    }

    #[async_trait]
    impl IntentGateway for RecordingGateway {
        async fn create_intent(&self, params: &IntentParams) -> CheckoutResult<PaymentIntent> {
            self.calls.lock().unwrap().push(Call::Create {
                amount: params.amount.cents(),
                currency: params.currency,
                automatic: params.automatic_payment_methods,
            });
            if let Some(failure) = self.upsert_failure {
                return Err(failure());
            }
            Ok(Self::intent(
                "pi_x",
                params.amount.cents(),
                IntentStatus::RequiresPaymentMethod,
            ))
        }

        async fn update_intent(
            &self,
            intent_id: &str,
            params: &IntentParams,
        ) -> CheckoutResult<PaymentIntent> {
            self.calls.lock().unwrap().push(Call::Update {
                id: intent_id.to_string(),
                amount: params.amount.cents(),
                currency: params.currency,
            });
            if let Some(failure) = self.upsert_failure {
                return Err(failure());
            }
            Ok(Self::intent(
                intent_id,
                params.amount.cents(),
                IntentStatus::RequiresPaymentMethod,
            ))
        }

        async fn cancel_intent(&self, intent_id: &str) -> CheckoutResult<PaymentIntent> {
            self.calls.lock().unwrap().push(Call::Cancel {
                id: intent_id.to_string(),
            });
            let status = (self.cancel_outcome)()?;
            Ok(Self::intent(intent_id, 1500, status))
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    fn runtime_config() -> RuntimeConfig {
        RuntimeConfig::from_lookup(|key: &str| match key {
            "STRIPE_SECRET_KEY" => Some("sk_test_abc".to_string()),
            "STRIPE_WEBHOOK_SECRET" => Some("whsec_abc".to_string()),
            "PUBLIC_STRIPE_PUBLISHABLE_KEY" => Some("pk_test_xyz".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn server_with(gateway: Arc<RecordingGateway>) -> TestServer {
        let state = AppState::new(
            gateway,
            runtime_config(),
            SiteConfig::default(),
            AppConfig::from_lookup(|_| None),
        );
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let server = server_with(Arc::new(RecordingGateway::new()));

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["provider"], "recording");
    }

    #[tokio::test]
    async fn test_create_intent() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        let response = server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 1500 }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "clientSecret": "pi_x_secret_y", "intentId": "pi_x" }));
        assert_eq!(
            gateway.calls(),
            vec![Call::Create {
                amount: 1500,
                currency: Currency::USD,
                automatic: true
            }]
        );
    }

    #[tokio::test]
    async fn test_minimum_amount_is_accepted() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 100 }))
            .await
            .assert_status_ok();
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_amount_below_minimum_is_rejected() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        for amount in [json!(50), json!(99), json!(0), json!(-1500)] {
            let response = server
                .post("/api/payments/intent")
                .json(&json!({ "amount_cents": amount }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({
                "statusCode": 400,
                "statusMessage": "Invalid amount (min $1.00)"
            }));
        }
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_integer_amount_is_rejected() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        for body in [
            json!({ "amount_cents": 150.5 }),
            json!({ "amount_cents": "1500" }),
            json!({ "intentId": "pi_x" }),
            json!({ "amount_cents": null }),
        ] {
            let response = server.post("/api/payments/intent").json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({
                "statusCode": 400,
                "statusMessage": "Invalid amount (min $1.00)"
            }));
        }
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        let response = server
            .post("/api/payments/intent")
            .text("amount_cents=1500")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["statusCode"], 400);
        assert!(body["statusMessage"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_an_invalid_amount() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        let response = server.post("/api/payments/intent").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "statusCode": 400,
            "statusMessage": "Invalid amount (min $1.00)"
        }));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_intent() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        let response = server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 2500, "intentId": "pi_existing" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "clientSecret": "pi_existing_secret_y",
            "intentId": "pi_existing"
        }));
        assert_eq!(
            gateway.calls(),
            vec![Call::Update {
                id: "pi_existing".to_string(),
                amount: 2500,
                currency: Currency::USD
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_intent_id_creates() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 1500, "intentId": "" }))
            .await
            .assert_status_ok();
        assert!(matches!(gateway.calls().as_slice(), [Call::Create { .. }]));
    }

    #[tokio::test]
    async fn test_update_rejection_is_classified() {
        let gateway = Arc::new(RecordingGateway {
            upsert_failure: Some(|| {
                CheckoutError::rejected(
                    "recording",
                    Some("This PaymentIntent's amount could not be updated".to_string()),
                )
            }),
            ..RecordingGateway::new()
        });
        let server = server_with(gateway);

        let response = server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 2500, "intentId": "pi_done" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["statusMessage"],
            "This PaymentIntent's amount could not be updated"
        );
    }

    #[tokio::test]
    async fn test_network_failure_uses_fallback() {
        let gateway = Arc::new(RecordingGateway {
            upsert_failure: Some(|| CheckoutError::Network("connection refused".to_string())),
            ..RecordingGateway::new()
        });
        let server = server_with(gateway);

        let response = server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 1500 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "statusCode": 400,
            "statusMessage": "Failed to create intent"
        }));

        let response = server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 1500, "intentId": "pi_x" }))
            .await;
        response.assert_json(&json!({
            "statusCode": 400,
            "statusMessage": "Failed to update intent"
        }));
    }

    #[tokio::test]
    async fn test_decode_failure_is_generic() {
        let gateway = Arc::new(RecordingGateway {
            upsert_failure: Some(|| CheckoutError::Serialization("missing field `id`".to_string())),
            ..RecordingGateway::new()
        });
        let server = server_with(gateway);

        let response = server
            .post("/api/payments/intent")
            .json(&json!({ "amount_cents": 1500 }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["statusMessage"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_cancel_intent() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        let response = server
            .delete("/api/payments/intent")
            .json(&json!({ "intentId": "pi_x" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true, "status": "canceled" }));
        assert_eq!(
            gateway.calls(),
            vec![Call::Cancel {
                id: "pi_x".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_cancel_reports_provider_status() {
        let gateway = Arc::new(RecordingGateway {
            cancel_outcome: || Ok(IntentStatus::Processing),
            ..RecordingGateway::new()
        });
        let server = server_with(gateway);

        let response = server
            .delete("/api/payments/intent")
            .json(&json!({ "intentId": "pi_x" }))
            .await;

        response.assert_json(&json!({ "success": true, "status": "processing" }));
    }

    #[tokio::test]
    async fn test_cancel_reports_unrecognised_status() {
        let gateway = Arc::new(RecordingGateway {
            cancel_outcome: || Ok(IntentStatus::Other("requires_review".to_string())),
            ..RecordingGateway::new()
        });
        let server = server_with(gateway);

        let response = server
            .delete("/api/payments/intent")
            .json(&json!({ "intentId": "pi_x" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true, "status": "requires_review" }));
    }

    #[tokio::test]
    async fn test_cancel_reads_body_without_json_content_type() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        let response = server
            .delete("/api/payments/intent")
            .text(r#"{"intentId":"pi_x"}"#)
            .await;

        response.assert_status_ok();
        assert_eq!(
            gateway.calls(),
            vec![Call::Cancel {
                id: "pi_x".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_cancel_network_failure_uses_fallback() {
        let gateway = Arc::new(RecordingGateway {
            cancel_outcome: || Err(CheckoutError::Network("connection reset by peer".to_string())),
            ..RecordingGateway::new()
        });
        let server = server_with(gateway.clone());

        let response = server
            .delete("/api/payments/intent")
            .json(&json!({ "intentId": "pi_x" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "statusCode": 400,
            "statusMessage": "Failed to cancel intent"
        }));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_missing_intent_id() {
        let gateway = Arc::new(RecordingGateway::new());
        let server = server_with(gateway.clone());

        for body in [json!({}), json!({ "intentId": "" }), json!({ "intentId": null })] {
            let response = server.delete("/api/payments/intent").json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({
                "statusCode": 400,
                "statusMessage": "Missing intentId"
            }));
        }

        server
            .delete("/api/payments/intent")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_rejection_forwards_message() {
        let gateway = Arc::new(RecordingGateway {
            cancel_outcome: || {
                Err(CheckoutError::rejected(
                    "recording",
                    Some("You cannot cancel this PaymentIntent because it has a status of succeeded.".to_string()),
                ))
            },
            ..RecordingGateway::new()
        });
        let server = server_with(gateway);

        let response = server
            .delete("/api/payments/intent")
            .json(&json!({ "intentId": "pi_done" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "statusCode": 400,
            "statusMessage": "You cannot cancel this PaymentIntent because it has a status of succeeded."
        }));
    }

    #[tokio::test]
    async fn test_cancel_rejection_without_message() {
        let gateway = Arc::new(RecordingGateway {
            cancel_outcome: || Err(CheckoutError::rejected("recording", None)),
            ..RecordingGateway::new()
        });
        let server = server_with(gateway);

        let response = server
            .delete("/api/payments/intent")
            .json(&json!({ "intentId": "pi_x" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["statusMessage"], "Failed to cancel intent");
    }

    #[tokio::test]
    async fn test_public_config_hides_secrets() {
        let server = server_with(Arc::new(RecordingGateway::new()));

        let response = server.get("/api/config").await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "stripePublishableKey": "pk_test_xyz",
            "baseURL": "http://localhost:3000",
            "stylesheets": ["/assets/css/tailwind.css", "/assets/css/theme.css"],
            "modules": ["content", "eslint", "fonts", "icon", "image", "scripts"]
        }));
        assert!(!response.text().contains("sk_test_abc"));
        assert!(!response.text().contains("whsec_abc"));
    }

    #[tokio::test]
    async fn test_unknown_path_falls_through_to_static_dir() {
        let server = server_with(Arc::new(RecordingGateway::new()));

        server
            .get("/no-such-page.html")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
