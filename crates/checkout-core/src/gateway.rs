//! # Intent Gateway Trait
//!
//! Seam between the HTTP handlers and a payment provider's intent API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   IntentGateway (trait)                     │
//! │  ├── create_intent()                                        │
//! │  ├── update_intent()                                        │
//! │  ├── cancel_intent()                                        │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                 ┌──────────┴──────────┐
//!         ┌───────┴───────┐     ┌───────┴───────┐
//!         │ StripeIntent  │     │  in-memory    │
//!         │   Gateway     │     │ (tests only)  │
//!         └───────────────┘     └───────────────┘
//! ```
//!
//! The provider owns the intent state machine. Implementations forward
//! requests and classify failures; they never retry.

use crate::error::CheckoutResult;
use crate::intent::{IntentParams, PaymentIntent};
use async_trait::async_trait;
use std::sync::Arc;

/// Payment provider operations on payment intents.
#[async_trait]
pub trait IntentGateway: Send + Sync {
    /// Create a new intent.
    async fn create_intent(&self, params: &IntentParams) -> CheckoutResult<PaymentIntent>;

    /// Change the amount/currency of an existing intent.
    async fn update_intent(
        &self,
        intent_id: &str,
        params: &IntentParams,
    ) -> CheckoutResult<PaymentIntent>;

    /// Cancel an intent. The provider decides whether the transition is legal.
    async fn cancel_intent(&self, intent_id: &str) -> CheckoutResult<PaymentIntent>;

    /// Get the provider name (for logging and error attribution).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedIntentGateway = Arc<dyn IntentGateway>;
