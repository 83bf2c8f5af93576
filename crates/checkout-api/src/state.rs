//! # Application State
//!
//! Shared state for the Axum application.
//! Everything in here is built once at startup and only read afterwards.

use crate::config::RuntimeConfig;
use crate::site::SiteConfig;
use checkout_core::{BoxedIntentGateway, Currency};
use checkout_stripe::{StripeConfig, StripeIntentGateway};
use std::sync::Arc;

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Override for the Stripe API base URL (local mocks)
    pub stripe_api_base_url: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            stripe_api_base_url: lookup("STRIPE_API_BASE_URL").filter(|u| !u.is_empty()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}: {}", addr, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment intent gateway
    pub gateway: BoxedIntentGateway,
    /// Secrets and public runtime values
    pub runtime: Arc<RuntimeConfig>,
    /// Front-end asset pipeline
    pub site: Arc<SiteConfig>,
    /// Server config
    pub config: AppConfig,
    /// Currency every intent is charged in
    pub currency: Currency,
}

impl AppState {
    /// Build state from the environment with the Stripe gateway
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let runtime = RuntimeConfig::from_env()?;
        let site = SiteConfig::load()?;

        let mut stripe_config = StripeConfig::new(runtime.stripe_secret_key.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        if let Some(url) = &config.stripe_api_base_url {
            stripe_config = stripe_config.with_api_base_url(url.clone());
        }

        let gateway = StripeIntentGateway::new(stripe_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::new(Arc::new(gateway), runtime, site, config))
    }

    /// Assemble state from already-built parts
    pub fn new(
        gateway: BoxedIntentGateway,
        runtime: RuntimeConfig,
        site: SiteConfig,
        config: AppConfig,
    ) -> Self {
        Self {
            gateway,
            runtime: Arc::new(runtime),
            site: Arc::new(site),
            config,
            currency: Currency::USD,
        }
    }

    /// Name of the configured payment provider
    pub fn provider(&self) -> &'static str {
        self.gateway.provider_name()
    }
}
