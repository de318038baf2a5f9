use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Look-back window for analytics over the snapshot series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PerformancePeriod {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl PerformancePeriod {
    /// Window length in days, `None` for the whole history.
    pub fn days(&self) -> Option<i64> {
        match self {
            PerformancePeriod::OneMonth => Some(30),
            PerformancePeriod::ThreeMonths => Some(90),
            PerformancePeriod::SixMonths => Some(180),
            PerformancePeriod::OneYear => Some(365),
            PerformancePeriod::All => None,
        }
    }
}

impl FromStr for PerformancePeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(PerformancePeriod::OneMonth),
            "3m" => Ok(PerformancePeriod::ThreeMonths),
            "6m" => Ok(PerformancePeriod::SixMonths),
            "1y" => Ok(PerformancePeriod::OneYear),
            "all" => Ok(PerformancePeriod::All),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown performance period '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMove {
    pub date: NaiveDate,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    /// Last minus first total profit over the window
    pub total_return: Decimal,
    /// Change in total value relative to the first snapshot's value
    pub total_return_percent: Decimal,
    pub best_day: Option<DailyMove>,
    pub worst_day: Option<DailyMove>,
    pub average_daily_profit: Decimal,
    pub win_days: usize,
    pub loss_days: usize,
    pub total_days: usize,
}

impl PerformanceStats {
    /// Share of winning days (0-100), 0 when the window is empty.
    pub fn win_rate(&self) -> Decimal {
        if self.total_days == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.win_days) / Decimal::from(self.total_days) * Decimal::ONE_HUNDRED
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub start_value: Decimal,
    pub end_value: Decimal,
    pub monthly_profit: Decimal,
    pub monthly_profit_rate: Decimal,
    /// Same rate for the month before, 0 when it has no snapshots
    pub previous_month_rate: Decimal,
    /// Value change since the first snapshot of the year, percent
    pub ytd_rate: Decimal,
}
