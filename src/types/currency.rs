//! Currency code type
//!
//! Monetary amounts in this crate are plain [`rust_decimal::Decimal`] values;
//! the currency they are denominated in travels alongside them as a
//! [`Currency`] code. Equality on the code is what drives the "document
//! currency differs from company currency" conversion decision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ISO-style currency code such as `USD` or `EUR`
///
/// The engine never interprets the code; it only compares codes for equality
/// and hands them to the [`CurrencyConverter`](crate::core::CurrencyConverter)
/// when amounts must move between denominations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a currency from a code string
    pub fn new(code: impl Into<String>) -> Self {
        Currency(code.into())
    }

    /// The currency code as a string slice
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::new(code)
    }
}
