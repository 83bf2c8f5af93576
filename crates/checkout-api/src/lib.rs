//! # checkout-api
//!
//! HTTP API layer for the storefront checkout backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Payment intent endpoints proxying to the configured gateway
//! - Runtime and site configuration exposed to the front-end
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/payments/intent` | Create or update a payment intent |
//! | DELETE | `/api/payments/intent` | Cancel a payment intent |
//! | GET | `/api/config` | Public runtime configuration |

pub mod config;
pub mod handlers;
pub mod routes;
pub mod site;
pub mod state;

pub use config::{PublicConfig, RuntimeConfig};
pub use routes::create_router;
pub use site::{SiteConfig, SiteModule};
pub use state::{AppConfig, AppState};
