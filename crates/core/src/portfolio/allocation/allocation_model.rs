//! Allocation models for portfolio breakdown by category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// Allocation for a single category bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAllocation {
    pub category: Category,
    /// Stored id, `None` for the uncategorized bucket
    pub category_id: Option<i32>,
    /// Sum of member market values in the reporting currency
    pub value: Decimal,
    /// Share of total portfolio value (0-100), 0 when the portfolio is worth nothing
    pub percentage: Decimal,
}
