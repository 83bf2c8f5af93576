//! # Amounts
//!
//! Charge amounts in minor currency units and the single bound the
//! checkout enforces locally before talking to a provider.

use crate::error::{CheckoutError, CheckoutResult};
use serde::Serialize;
use serde_json::Value;

/// Smallest chargeable amount, in minor units ($1.00).
pub const MIN_AMOUNT_CENTS: i64 = 100;

/// Currency the storefront charges in (ISO 4217)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Returns the ISO 4217 currency code as the provider expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }

    /// Format an amount in minor units for display (e.g. `$1.00`)
    pub fn format_minor(&self, amount: i64) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        let abs = amount.unsigned_abs();
        format!("{}{}{}.{:02}", sign, self.symbol(), abs / 100, abs % 100)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A validated charge amount in minor units.
///
/// Holding an `Amount` means the minimum has already been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Validate an integer amount of minor units.
    pub fn from_cents(cents: i64) -> CheckoutResult<Self> {
        if cents < MIN_AMOUNT_CENTS {
            return Err(invalid_amount());
        }
        Ok(Self(cents))
    }

    /// Validate an untyped JSON value the way a browser client sends it.
    ///
    /// Accepts integers and floats without a fractional part (`1500.0`);
    /// strings, fractions, `null` and anything else are rejected.
    pub fn from_json(value: Option<&Value>) -> CheckoutResult<Self> {
        let number = match value {
            Some(Value::Number(n)) => n,
            _ => return Err(invalid_amount()),
        };

        if let Some(cents) = number.as_i64() {
            return Self::from_cents(cents);
        }

        match number.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Self::from_cents(f as i64)
            }
            _ => Err(invalid_amount()),
        }
    }

    /// Amount in minor units
    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn invalid_amount() -> CheckoutError {
    CheckoutError::InvalidArgument(format!(
        "Invalid amount (min {})",
        Currency::USD.format_minor(MIN_AMOUNT_CENTS)
    ))
}
