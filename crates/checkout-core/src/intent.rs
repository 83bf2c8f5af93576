//! # Payment Intents
//!
//! The provider-owned payment intent, as much of it as the checkout reads.
//! Nothing here is persisted; every request works against the provider's copy.

use crate::amount::{Amount, Currency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status reported by the provider
///
/// The provider may add statuses; those decode into `Other` with the raw
/// wire name kept so it can be reported back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    #[serde(untagged)]
    Other(String),
}

impl IntentStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &str {
        match self {
            IntentStatus::RequiresPaymentMethod => "requires_payment_method",
            IntentStatus::RequiresConfirmation => "requires_confirmation",
            IntentStatus::RequiresAction => "requires_action",
            IntentStatus::Processing => "processing",
            IntentStatus::RequiresCapture => "requires_capture",
            IntentStatus::Canceled => "canceled",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Other(raw) => raw,
        }
    }

    /// Terminal statuses accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, IntentStatus::Canceled | IntentStatus::Succeeded)
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment intent as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider-assigned identifier (e.g. `pi_...`)
    pub id: String,
    /// Amount in minor units
    pub amount: i64,
    /// Lowercase ISO 4217 code as the provider reports it
    pub currency: String,
    /// Token the browser uses to complete the payment
    pub client_secret: Option<String>,
    /// Current lifecycle status
    pub status: IntentStatus,
    /// Creation time at the provider
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating or updating an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentParams {
    pub amount: Amount,
    pub currency: Currency,
    /// Let the provider pick eligible payment methods (cards, wallets, ...)
    pub automatic_payment_methods: bool,
}

impl IntentParams {
    /// Parameters for a new intent
    pub fn create(amount: Amount, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            automatic_payment_methods: true,
        }
    }

    /// Parameters for re-pricing an existing intent
    pub fn update(amount: Amount, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            automatic_payment_methods: false,
        }
    }
}
