//! # Stripe Payment Intents
//!
//! `IntentGateway` implementation over Stripe's Payment Intents API.
//! Requests are form-encoded; responses and errors are JSON.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, IntentGateway, IntentParams, IntentStatus, PaymentIntent,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Matches the reference Stripe client's default request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 80;

/// Stripe Payment Intents gateway
///
/// Holds one pooled HTTP client for the lifetime of the process.
pub struct StripeIntentGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeIntentGateway {
    /// Create a new Stripe intent gateway
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.config.api_base_url)
    }

    fn intent_url(&self, intent_id: &str) -> CheckoutResult<String> {
        validate_intent_id(intent_id)?;
        Ok(format!("{}/{}", self.intents_url(), intent_id))
    }

    /// POST a form to Stripe and decode the payment intent it returns
    async fn post_form(
        &self,
        url: &str,
        form_params: &[(String, String)],
    ) -> CheckoutResult<PaymentIntent> {
        let response = self
            .client
            .post(url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(form_params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            let message = serde_json::from_str::<StripeErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message);
            return Err(CheckoutError::rejected("stripe", message));
        }

        let intent: StripePaymentIntentResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(intent.into_payment_intent())
    }
}

#[async_trait]
impl IntentGateway for StripeIntentGateway {
    #[instrument(skip(self, params), fields(amount = %params.amount))]
    async fn create_intent(&self, params: &IntentParams) -> CheckoutResult<PaymentIntent> {
        debug!("Creating Stripe payment intent");

        let intent = self
            .post_form(&self.intents_url(), &form_params(params))
            .await?;

        info!("Created Stripe payment intent: id={}", intent.id);
        Ok(intent)
    }

    #[instrument(skip(self, params), fields(amount = %params.amount))]
    async fn update_intent(
        &self,
        intent_id: &str,
        params: &IntentParams,
    ) -> CheckoutResult<PaymentIntent> {
        let url = self.intent_url(intent_id)?;
        let intent = self.post_form(&url, &form_params(params)).await?;

        info!(
            "Updated Stripe payment intent: id={}, status={}",
            intent.id, intent.status
        );
        Ok(intent)
    }

    #[instrument(skip(self))]
    async fn cancel_intent(&self, intent_id: &str) -> CheckoutResult<PaymentIntent> {
        let url = format!("{}/cancel", self.intent_url(intent_id)?);
        let intent = self.post_form(&url, &[]).await?;

        info!(
            "Canceled Stripe payment intent: id={}, status={}",
            intent.id, intent.status
        );
        Ok(intent)
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

/// Build the form body shared by create and update
fn form_params(params: &IntentParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), params.amount.cents().to_string()),
        ("currency".to_string(), params.currency.as_str().to_string()),
    ];
    if params.automatic_payment_methods {
        form.push((
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ));
    }
    form
}

/// Intent ids are interpolated into the request path, so only the
/// characters Stripe itself uses are let through.
fn validate_intent_id(intent_id: &str) -> CheckoutResult<()> {
    let well_formed = !intent_id.is_empty()
        && intent_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if well_formed {
        Ok(())
    } else {
        Err(CheckoutError::InvalidArgument(format!(
            "Invalid intentId: {}",
            intent_id
        )))
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripePaymentIntentResponse {
    id: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    client_secret: Option<String>,
    status: IntentStatus,
    #[serde(default)]
    created: i64,
}

impl StripePaymentIntentResponse {
    fn into_payment_intent(self) -> PaymentIntent {
        PaymentIntent {
            id: self.id,
            amount: self.amount,
            currency: self.currency,
            client_secret: self.client_secret,
            status: self.status,
            created_at: DateTime::from_timestamp(self.created, 0).unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
}
