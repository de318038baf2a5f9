//! Goals domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// Value a user wants a category to reach, reporting currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGoal {
    pub category: Category,
    pub target_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub category: Category,
    pub target_amount: Decimal,
    pub current_value: Decimal,
    /// Never negative, 0 once the goal is met
    pub remaining_amount: Decimal,
    /// Uncapped, may exceed 100
    pub progress_percent: Decimal,
    pub is_achieved: bool,
}
