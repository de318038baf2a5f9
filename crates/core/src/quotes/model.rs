use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use myfolio_market_data::Quote;

/// Outcome of a batch quote fetch.
///
/// Tickers that failed are listed in `failed` and absent from `quotes`; the
/// valuation falls back to their last-known price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBatch {
    pub quotes: HashMap<String, Quote>,
    pub failed: Vec<String>,
}

impl QuoteBatch {
    /// Ticker to current price, the shape the valuation calculator consumes.
    pub fn prices(&self) -> HashMap<String, Decimal> {
        self.quotes
            .iter()
            .map(|(ticker, quote)| (ticker.clone(), quote.current_price))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
