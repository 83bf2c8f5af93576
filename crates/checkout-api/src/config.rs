//! # Runtime Configuration
//!
//! Secrets and public settings read once at startup and shared read-only
//! through `AppState`. Split into a private half (server only) and a public
//! half that may be handed to the browser.

use anyhow::{bail, Context};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Process-wide configuration derived from the environment
#[derive(Clone)]
pub struct RuntimeConfig {
    /// `STRIPE_SECRET_KEY`
    pub stripe_secret_key: String,
    /// `STRIPE_WEBHOOK_SECRET`; carried for webhook consumers, none is mounted
    pub stripe_webhook_secret: Option<String>,
    /// Browser-safe values
    pub public: PublicConfig,
}

/// The subset of configuration safe to expose to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicConfig {
    /// `PUBLIC_STRIPE_PUBLISHABLE_KEY`
    pub stripe_publishable_key: Option<String>,
    /// `BASE_URL`
    pub base_url: String,
}

impl RuntimeConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let stripe_secret_key = non_empty("STRIPE_SECRET_KEY").context("STRIPE_SECRET_KEY not set")?;

        let stripe_publishable_key = non_empty("PUBLIC_STRIPE_PUBLISHABLE_KEY");
        if let Some(key) = &stripe_publishable_key {
            if !key.starts_with("pk_") {
                bail!("PUBLIC_STRIPE_PUBLISHABLE_KEY must start with pk_");
            }
        }

        let base_url = non_empty("BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            stripe_secret_key,
            stripe_webhook_secret: non_empty("STRIPE_WEBHOOK_SECRET"),
            public: PublicConfig {
                stripe_publishable_key,
                base_url,
            },
        })
    }

    /// Whether a webhook signing secret was provided
    pub fn has_webhook_secret(&self) -> bool {
        self.stripe_webhook_secret.is_some()
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("stripe_secret_key", &"[REDACTED]")
            .field(
                "stripe_webhook_secret",
                &self.stripe_webhook_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("public", &self.public)
            .finish()
    }
}
