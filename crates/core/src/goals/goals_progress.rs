use rust_decimal::Decimal;

use super::{CategoryGoal, GoalProgress};
use crate::portfolio::allocation::{percentage_of, CategoryAllocation};

/// Progress of each goal against the current allocation, in goal order.
pub fn goal_progress(
    allocations: &[CategoryAllocation],
    goals: &[CategoryGoal],
) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|goal| {
            let current_value = allocations
                .iter()
                .filter(|a| a.category == goal.category)
                .map(|a| a.value)
                .sum::<Decimal>();
            let remaining_amount = (goal.target_amount - current_value).max(Decimal::ZERO);

            GoalProgress {
                category: goal.category,
                target_amount: goal.target_amount,
                current_value,
                remaining_amount,
                progress_percent: percentage_of(current_value, goal.target_amount),
                is_achieved: goal.target_amount > Decimal::ZERO && remaining_amount.is_zero(),
            }
        })
        .collect()
}
