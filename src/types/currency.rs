//! Currency codes
//!
//! Currency codes are compared case-insensitively everywhere in the ledger, so
//! they are normalised to upper case once, on construction.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Render an amount with two decimals, rounding half away from zero
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// A currency code such as `RON` or `EUR`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(String);

impl Currency {
    /// Create a currency from any casing of its code
    pub fn new(code: impl AsRef<str>) -> Self {
        Currency(code.as_ref().trim().to_uppercase())
    }

    /// The normalised code
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

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::new(code)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(Currency::new(code))
    }
}
