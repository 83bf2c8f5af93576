//! # Request Handlers
//!
//! Axum request handlers for the checkout API.
//! Intent handlers validate locally, then make exactly one gateway call.

use crate::site::SiteModule;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use checkout_core::{Amount, CheckoutError, IntentParams, IntentStatus};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

const CREATE_FAILED: &str = "Failed to create intent";
const UPDATE_FAILED: &str = "Failed to update intent";
const CANCEL_FAILED: &str = "Failed to cancel intent";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create-or-update intent request
#[derive(Debug, Default, Deserialize)]
pub struct IntentRequest {
    /// Amount in cents; kept untyped so non-integers get the amount error
    #[serde(default)]
    pub amount_cents: Option<Value>,
    /// Existing intent to re-price (optional)
    #[serde(default, rename = "intentId")]
    pub intent_id: Option<String>,
}

/// Create-or-update intent response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    /// Secret the browser uses to confirm the payment
    pub client_secret: Option<String>,
    /// Intent identifier to send back on later updates or cancel
    pub intent_id: String,
}

/// Cancel intent request
#[derive(Debug, Default, Deserialize)]
pub struct CancelIntentRequest {
    #[serde(default, rename = "intentId")]
    pub intent_id: Option<String>,
}

/// Cancel intent response
#[derive(Debug, Serialize)]
pub struct CancelIntentResponse {
    pub success: bool,
    /// Status reported by the provider after cancellation
    pub status: IntentStatus,
}

/// Browser-safe configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigResponse {
    pub stripe_publishable_key: Option<String>,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub stylesheets: Vec<String>,
    pub modules: Vec<SiteModule>,
}

/// Error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub status_message: String,
}

impl ErrorResponse {
    pub fn new(status_message: impl Into<String>, status_code: u16) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a checkout error to a response, using `fallback` when a provider
/// rejection carries no message of its own.
fn checkout_error_to_response(err: CheckoutError, fallback: &str) -> ApiError {
    match &err {
        CheckoutError::Network(_) => error!("Provider unreachable: {}", err),
        _ if err.is_client_error() => warn!("Request rejected: {}", err),
        _ => error!("Unhandled checkout failure: {}", err),
    }

    let code = err.status_code();
    let response = ErrorResponse::new(err.public_message(fallback), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Decode a JSON request body whatever its `Content-Type`.
///
/// An empty body decodes to the request's defaults.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-checkout",
        "provider": state.provider(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Public runtime configuration for the storefront front-end
pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfigResponse> {
    Json(PublicConfigResponse {
        stripe_publishable_key: state.runtime.public.stripe_publishable_key.clone(),
        base_url: state.runtime.public.base_url.clone(),
        stylesheets: state.site.stylesheet_urls(),
        modules: state.site.modules.clone(),
    })
}

/// Create a payment intent, or re-price an existing one
#[instrument(skip(state, body))]
pub async fn upsert_intent(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IntentResponse>, ApiError> {
    let request: IntentRequest = parse_body(&body).map_err(|e| {
        checkout_error_to_response(
            CheckoutError::InvalidArgument(format!("Invalid request body: {}", e)),
            CREATE_FAILED,
        )
    })?;

    let amount = Amount::from_json(request.amount_cents.as_ref())
        .map_err(|e| checkout_error_to_response(e, CREATE_FAILED))?;

    let intent = match request.intent_id.filter(|id| !id.is_empty()) {
        Some(intent_id) => {
            info!("Updating payment intent: id={}, amount={}", intent_id, amount);
            let params = IntentParams::update(amount, state.currency);
            state
                .gateway
                .update_intent(&intent_id, &params)
                .await
                .map_err(|e| checkout_error_to_response(e, UPDATE_FAILED))?
        }
        None => {
            info!("Creating payment intent: amount={}", amount);
            let params = IntentParams::create(amount, state.currency);
            state
                .gateway
                .create_intent(&params)
                .await
                .map_err(|e| checkout_error_to_response(e, CREATE_FAILED))?
        }
    };

    Ok(Json(IntentResponse {
        client_secret: intent.client_secret,
        intent_id: intent.id,
    }))
}

/// Cancel a payment intent
#[instrument(skip(state, body))]
pub async fn cancel_intent(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CancelIntentResponse>, ApiError> {
    let intent_id = parse_body::<CancelIntentRequest>(&body)
        .ok()
        .and_then(|request| request.intent_id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            checkout_error_to_response(
                CheckoutError::MissingArgument("Missing intentId".to_string()),
                CANCEL_FAILED,
            )
        })?;

    let intent = state
        .gateway
        .cancel_intent(&intent_id)
        .await
        .map_err(|e| checkout_error_to_response(e, CANCEL_FAILED))?;

    info!(
        "Cancel processed: id={}, status={}, terminal={}",
        intent.id,
        intent.status,
        intent.status.is_terminal()
    );

    Ok(Json(CancelIntentResponse {
        success: true,
        status: intent.status,
    }))
}
