//! # checkout-stripe
//!
//! Stripe payment intent gateway for the storefront checkout backend.
//!
//! `StripeIntentGateway` implements `checkout_core::IntentGateway` on top of
//! Stripe's Payment Intents API:
//!
//! | Operation | Stripe endpoint |
//! |-----------|-----------------|
//! | create | `POST /v1/payment_intents` |
//! | update | `POST /v1/payment_intents/{id}` |
//! | cancel | `POST /v1/payment_intents/{id}/cancel` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_core::{Amount, Currency, IntentGateway, IntentParams};
//! use checkout_stripe::{StripeConfig, StripeIntentGateway};
//!
//! let config = StripeConfig::new(secret_key)?;
//! let gateway = StripeIntentGateway::new(config)?;
//! let amount = Amount::from_cents(1500)?;
//! let intent = gateway
//!     .create_intent(&IntentParams::create(amount, Currency::USD))
//!     .await?;
//! ```
//!
//! Stripe's error message is kept on `CheckoutError::RemoteRejected` so the
//! API layer can forward it to the browser.

pub mod config;
pub mod intents;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripeIntentGateway;
