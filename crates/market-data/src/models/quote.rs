use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest market quote for a single ticker.
///
/// Prices are in the instrument's own trading currency.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker as reported by the provider
    pub symbol: String,

    /// Latest traded price
    pub current_price: Decimal,

    /// Previous session close
    pub previous_close: Decimal,

    /// Quote currency
    pub currency: String,

    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Source of the quote (YAHOO, MANUAL, ...)
    pub source: String,
}

impl Quote {
    /// Create a quote whose previous close equals the current price
    pub fn new(symbol: &str, current_price: Decimal, currency: &str, source: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            current_price,
            previous_close: current_price,
            currency: currency.to_string(),
            timestamp: Utc::now(),
            source: source.to_string(),
        }
    }

    /// Absolute move since the previous close
    pub fn change(&self) -> Decimal {
        self.current_price - self.previous_close
    }

    /// Percentage move since the previous close, 0 when there is no previous close
    pub fn change_percent(&self) -> Decimal {
        if self.previous_close.is_zero() {
            return Decimal::ZERO;
        }
        self.change() / self.previous_close * Decimal::ONE_HUNDRED
    }
}
