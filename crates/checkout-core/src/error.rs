//! # Checkout Error Types
//!
//! Typed error handling for the checkout backend.
//! All intent operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A request field failed local validation
    #[error("{0}")]
    InvalidArgument(String),

    /// A required request field was absent or empty
    #[error("{0}")]
    MissingArgument(String),

    /// The payment provider answered with an error
    #[error("Provider error [{provider}]: {}", .message.as_deref().unwrap_or("no message"))]
    RemoteRejected {
        provider: String,
        message: Option<String>,
    },

    /// The provider could not be reached or dropped the exchange mid-call.
    ///
    /// Reported like a rejection without a message: the caller sees the
    /// per-operation fallback.
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Build a provider rejection carrying the provider's own message.
    pub fn rejected(provider: impl Into<String>, message: Option<String>) -> Self {
        CheckoutError::RemoteRejected {
            provider: provider.into(),
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::InvalidArgument(_) => 400,
            CheckoutError::MissingArgument(_) => 400,
            CheckoutError::RemoteRejected { .. } => 400,
            CheckoutError::Network(_) => 400,
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// True for failures that were classified before reaching the client.
    ///
    /// Everything else is an unhandled fault and is reported generically.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Message safe to show to the caller.
    ///
    /// Provider rejections fall back to `fallback` when the provider sent no
    /// message, as do transport failures; unhandled faults never leak their
    /// details.
    pub fn public_message(&self, fallback: &str) -> String {
        match self {
            CheckoutError::InvalidArgument(msg) | CheckoutError::MissingArgument(msg) => {
                msg.clone()
            }
            CheckoutError::RemoteRejected { message, .. } => message
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
            CheckoutError::Network(_) => fallback.to_string(),
            _ => "Internal Server Error".to_string(),
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
