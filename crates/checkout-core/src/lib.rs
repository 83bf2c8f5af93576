//! # checkout-core
//!
//! Core types and traits for the storefront checkout backend.
//!
//! This crate provides:
//! - `Amount` and `Currency` with the minimum-charge check
//! - `PaymentIntent` and `IntentStatus` mirroring the provider's entity
//! - `IntentGateway` trait for payment providers
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{Amount, Currency, IntentGateway, IntentParams};
//!
//! let amount = Amount::from_cents(1500)?;
//! let intent = gateway
//!     .create_intent(&IntentParams::create(amount, Currency::USD))
//!     .await?;
//!
//! // Hand intent.client_secret to the browser
//! ```

pub mod amount;
pub mod error;
pub mod gateway;
pub mod intent;

// Re-exports for convenience
pub use amount::{Amount, Currency, MIN_AMOUNT_CENTS};
pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{BoxedIntentGateway, IntentGateway};
pub use intent::{IntentParams, IntentStatus, PaymentIntent};
