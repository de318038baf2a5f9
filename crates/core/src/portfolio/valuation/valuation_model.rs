use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fx::ExchangeRate;
use crate::positions::Position;

/// Which price a valuation used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    /// Fresh quote from the price map.
    Live,
    /// Stored price, because no fresh quote was available.
    LastKnown,
}

/// A position with its derived valuation.
///
/// Money fields are in the position's own market currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedPosition {
    #[serde(flatten)]
    pub position: Position,
    pub price: Decimal,
    pub price_source: PriceSource,
    pub market_value: Decimal,
    pub investment: Decimal,
    pub profit: Decimal,
    /// Percent, 0 when investment is 0.
    pub profit_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValuationStatus {
    /// No positions, nothing to value yet.
    Empty,
    /// Every position priced from a fresh quote.
    Live,
    /// At least one position fell back to its last-known price.
    Stale,
}

/// Aggregate valuation of one user's portfolio in the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub positions: Vec<ValuedPosition>,
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub profit_rate: Decimal,
    /// Rate the foreign positions were converted with.
    pub exchange_rate: Decimal,
    pub stale_tickers: Vec<String>,
    pub status: ValuationStatus,
}

impl PortfolioValuation {
    pub fn totals(&self) -> PortfolioTotals {
        PortfolioTotals {
            total_value: self.total_value,
            total_cost: self.total_cost,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status == ValuationStatus::Empty
    }
}

/// Aggregate totals a snapshot is built from, reporting currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_value: Decimal,
    pub total_cost: Decimal,
}

/// Live valuation together with the exchange rate it was computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub valuation: PortfolioValuation,
    pub exchange_rate: ExchangeRate,
}
