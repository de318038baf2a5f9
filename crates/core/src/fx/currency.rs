//! Currency normalization.

use rust_decimal::Decimal;

use crate::positions::Market;

/// Converts an amount in `market`'s currency into the reporting currency.
///
/// FOREIGN amounts are multiplied by `exchange_rate` (reporting units per USD).
/// DOMESTIC amounts pass through unchanged. Total and infallible.
pub fn to_reporting_currency(amount: Decimal, market: Market, exchange_rate: Decimal) -> Decimal {
    match market {
        Market::Domestic => amount,
        Market::Foreign => amount * exchange_rate,
    }
}
