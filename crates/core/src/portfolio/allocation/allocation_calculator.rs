use rust_decimal::Decimal;

use super::CategoryAllocation;
use crate::fx::to_reporting_currency;
use crate::portfolio::valuation::ValuedPosition;

/// `part / whole × 100`, or 0 when `whole` is 0.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part / whole * Decimal::ONE_HUNDRED
}

/// Buckets valued positions by category.
///
/// Values are normalized to the reporting currency. Missing or unknown
/// category ids land in the uncategorized bucket. Buckets keep first-seen
/// order.
pub fn aggregate_by_category(
    valued_positions: &[ValuedPosition],
    exchange_rate: Decimal,
) -> Vec<CategoryAllocation> {
    let mut buckets: Vec<CategoryAllocation> = Vec::new();
    let mut total = Decimal::ZERO;

    for vp in valued_positions {
        let category = vp.position.category();
        let value = to_reporting_currency(vp.market_value, vp.position.market, exchange_rate);
        total += value;

        match buckets.iter_mut().find(|b| b.category == category) {
            Some(bucket) => bucket.value += value,
            None => buckets.push(CategoryAllocation {
                category,
                category_id: category.id(),
                value,
                percentage: Decimal::ZERO,
            }),
        }
    }

    for bucket in &mut buckets {
        bucket.percentage = percentage_of(bucket.value, total);
    }
    buckets
}
