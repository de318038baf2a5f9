use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXCHANGE_RATE;

/// Where an exchange rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Live,
    /// Configured fallback, used when no live rate could be fetched.
    Default,
}

/// USD to reporting currency rate (reporting units per one USD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub rate: Decimal,
    pub source: RateSource,
    pub timestamp: DateTime<Utc>,
}

impl ExchangeRate {
    pub fn live(rate: Decimal) -> Self {
        Self {
            rate,
            source: RateSource::Live,
            timestamp: Utc::now(),
        }
    }

    pub fn fallback(rate: Decimal) -> Self {
        Self {
            rate,
            source: RateSource::Default,
            timestamp: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Default
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::fallback(DEFAULT_EXCHANGE_RATE)
    }
}
