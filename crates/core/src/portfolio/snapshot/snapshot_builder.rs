//! Pure construction of daily snapshots.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::Snapshot;
use crate::portfolio::valuation::profit_rate;

/// Start of the period a snapshot's incremental profit is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotPeriod {
    Month,
    Year,
}

impl SnapshotPeriod {
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        let start = match self {
            SnapshotPeriod::Month => date.with_day(1),
            SnapshotPeriod::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        };
        start.unwrap_or(date)
    }
}

/// First snapshot dated on or after the period start and strictly before `date`.
///
/// `history` must be sorted ascending by date.
pub fn period_baseline<'a>(
    history: &'a [Snapshot],
    date: NaiveDate,
    period: SnapshotPeriod,
) -> Option<&'a Snapshot> {
    let start = period.start_of(date);
    let idx = history.partition_point(|s| s.date < start);
    history.get(idx).filter(|s| s.date < date)
}

/// Builds the snapshot for `date` from today's totals.
///
/// `previous` is the most recent snapshot before `date`; one dated on or after
/// `date` is ignored. `history` must be ascending and cover at least the year
/// containing `date`; entries outside the year are tolerated.
///
/// Deterministic: the same inputs always yield the same snapshot.
pub fn build_snapshot(
    date: NaiveDate,
    total_value: Decimal,
    total_cost: Decimal,
    previous: Option<&Snapshot>,
    history: &[Snapshot],
) -> Snapshot {
    debug_assert!(history.windows(2).all(|w| w[0].date <= w[1].date));

    let total_profit = total_value - total_cost;

    let daily_profit = previous
        .filter(|p| p.date < date)
        .map(|p| total_value - p.total_value)
        .unwrap_or(Decimal::ZERO);

    let period_profit = |period| {
        period_baseline(history, date, period)
            .map(|base| total_value - base.total_value)
            .unwrap_or(total_profit)
    };

    Snapshot {
        date,
        total_value,
        total_cost,
        total_profit,
        profit_rate: profit_rate(total_profit, total_cost),
        daily_profit,
        monthly_profit: period_profit(SnapshotPeriod::Month),
        yearly_profit: period_profit(SnapshotPeriod::Year),
    }
}
