use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily valuation record for one user.
///
/// At most one per (user, date). All amounts are in the reporting currency and
/// `total_profit == total_value - total_cost` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub date: NaiveDate,
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    /// Percent of total cost, 0 when nothing was invested
    pub profit_rate: Decimal,
    /// Change in total value since the most recent earlier snapshot
    pub daily_profit: Decimal,
    /// Change in total value since the first snapshot of the month
    pub monthly_profit: Decimal,
    /// Change in total value since the first snapshot of the year
    pub yearly_profit: Decimal,
}
