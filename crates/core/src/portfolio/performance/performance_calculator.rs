//! Analytics over a stored snapshot series.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::{DailyMove, MonthlySummary, PerformancePeriod, PerformanceStats};
use crate::portfolio::allocation::percentage_of;
use crate::portfolio::snapshot::Snapshot;

/// Snapshots within `period` days of `today` (inclusive), ascending by date.
pub fn filter_by_period(
    snapshots: &[Snapshot],
    period: PerformancePeriod,
    today: NaiveDate,
) -> Vec<Snapshot> {
    let mut filtered: Vec<Snapshot> = snapshots
        .iter()
        .filter(|s| match period.days() {
            Some(days) => (today - s.date).num_days() <= days,
            None => true,
        })
        .cloned()
        .collect();
    filtered.sort_by_key(|s| s.date);
    filtered
}

/// Summary statistics over an ascending snapshot series.
///
/// Best and worst days keep the earliest date on ties.
pub fn calculate_performance_stats(snapshots: &[Snapshot]) -> PerformanceStats {
    let (first, last) = match (snapshots.first(), snapshots.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return PerformanceStats::default(),
    };

    let mut best: Option<&Snapshot> = None;
    let mut worst: Option<&Snapshot> = None;
    for s in snapshots {
        if best.map_or(true, |b| s.daily_profit > b.daily_profit) {
            best = Some(s);
        }
        if worst.map_or(true, |w| s.daily_profit < w.daily_profit) {
            worst = Some(s);
        }
    }
    let to_move = |s: &Snapshot| DailyMove {
        date: s.date,
        profit: s.daily_profit,
    };

    let total_days = snapshots.len();
    let daily_sum: Decimal = snapshots.iter().map(|s| s.daily_profit).sum();

    PerformanceStats {
        total_return: last.total_profit - first.total_profit,
        total_return_percent: percentage_of(last.total_value - first.total_value, first.total_value),
        best_day: best.map(to_move),
        worst_day: worst.map(to_move),
        average_daily_profit: daily_sum / Decimal::from(total_days),
        win_days: snapshots.iter().filter(|s| s.daily_profit > Decimal::ZERO).count(),
        loss_days: snapshots.iter().filter(|s| s.daily_profit < Decimal::ZERO).count(),
        total_days,
    }
}

fn month_of(snapshots: &[Snapshot], year: i32, month: u32) -> Vec<&Snapshot> {
    let mut in_month: Vec<&Snapshot> = snapshots
        .iter()
        .filter(|s| s.date.year() == year && s.date.month() == month)
        .collect();
    in_month.sort_by_key(|s| s.date);
    in_month
}

fn value_change_rate(start: Decimal, end: Decimal) -> Decimal {
    percentage_of(end - start, start)
}

/// Start and end of month values with the derived profit and rates.
///
/// Returns `None` when the month has no snapshots.
pub fn monthly_summary(snapshots: &[Snapshot], year: i32, month: u32) -> Option<MonthlySummary> {
    let in_month = month_of(snapshots, year, month);
    let start_value = in_month.first()?.total_value;
    let end_value = in_month.last()?.total_value;

    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let previous = month_of(snapshots, prev_year, prev_month);
    let previous_month_rate = match (previous.first(), previous.last()) {
        (Some(first), Some(last)) => value_change_rate(first.total_value, last.total_value),
        _ => Decimal::ZERO,
    };

    let ytd_start = snapshots
        .iter()
        .filter(|s| s.date.year() == year)
        .min_by_key(|s| s.date)
        .map(|s| s.total_value)
        .unwrap_or(start_value);

    Some(MonthlySummary {
        year,
        month,
        start_value,
        end_value,
        monthly_profit: end_value - start_value,
        monthly_profit_rate: value_change_rate(start_value, end_value),
        previous_month_rate,
        ytd_rate: value_change_rate(ytd_start, end_value),
    })
}
