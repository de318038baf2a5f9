use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TradeAction;
use crate::constants::{DEFAULT_COMMISSION_RATE, DEFAULT_TRANSACTION_TAX_RATE};
use crate::errors::{Error, Result, ValidationError};

/// Brokerage fee schedule used to cost a rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingCosts {
    /// Charged on buys and sells
    pub commission_rate: Decimal,
    /// Charged on sells only
    pub transaction_tax_rate: Decimal,
}

impl Default for TradingCosts {
    fn default() -> Self {
        Self {
            commission_rate: DEFAULT_COMMISSION_RATE,
            transaction_tax_rate: DEFAULT_TRANSACTION_TAX_RATE,
        }
    }
}

impl TradingCosts {
    pub fn new(commission_rate: Decimal, transaction_tax_rate: Decimal) -> Result<Self> {
        if commission_rate.is_sign_negative() || transaction_tax_rate.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Trading cost rates cannot be negative".to_string(),
            )));
        }
        Ok(Self {
            commission_rate,
            transaction_tax_rate,
        })
    }

    /// Cost of trading `amount` (reporting currency) in direction `action`.
    pub fn estimate(&self, amount: Decimal, action: TradeAction) -> Decimal {
        match action {
            TradeAction::Buy => amount * self.commission_rate,
            TradeAction::Sell => amount * (self.commission_rate + self.transaction_tax_rate),
            TradeAction::None => Decimal::ZERO,
        }
    }
}

/// Cost under the default fee schedule.
pub fn estimate_trading_cost(amount: Decimal, action: TradeAction) -> Decimal {
    TradingCosts::default().estimate(amount, action)
}
