//! Stateless rebalancing computation over valued positions.

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{
    CategoryDiff, MomentumSelection, RebalancingSimulation, RebalancingTarget, SelectionPolicy,
    StockSuggestion, TradeAction, TradingCosts,
};
use crate::categories::Category;
use crate::fx::to_reporting_currency;
use crate::portfolio::allocation::{aggregate_by_category, CategoryAllocation};
use crate::portfolio::valuation::ValuedPosition;

/// Per target category: current vs target value and the implied action.
///
/// Only the three target categories are reported; uncategorized holdings
/// count toward the total but never get a target.
pub fn calculate_category_diffs(
    valued_positions: &[ValuedPosition],
    targets: &RebalancingTarget,
    exchange_rate: Decimal,
) -> Vec<CategoryDiff> {
    let allocations = aggregate_by_category(valued_positions, exchange_rate);
    let total: Decimal = allocations.iter().map(|a| a.value).sum();

    targets
        .entries()
        .into_iter()
        .map(|(category, target_percent)| {
            let current = allocations.iter().find(|a| a.category == category);
            let current_value = current.map_or(Decimal::ZERO, |a| a.value);
            let target_percent = Decimal::from(target_percent);
            let target_value = total * target_percent / Decimal::ONE_HUNDRED;
            let diff = target_value - current_value;

            CategoryDiff {
                category,
                current_value,
                target_value,
                diff,
                current_percent: current.map_or(Decimal::ZERO, |a| a.percentage),
                target_percent,
                action: TradeAction::from_diff(diff),
            }
        })
        .collect()
}

/// Base a simulated trade is costed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostBasis {
    /// The category-level amount to move, `|diff|`.
    #[default]
    SuggestedAmount,
    /// Whole shares actually tradable, `quantity × normalized price`.
    TradeValue,
}

/// Rebalancing engine with a pluggable selection policy and fee schedule.
pub struct RebalancingEngine {
    policy: Box<dyn SelectionPolicy>,
    costs: TradingCosts,
    cost_basis: CostBasis,
}

impl Default for RebalancingEngine {
    fn default() -> Self {
        Self::new(TradingCosts::default())
    }
}

impl RebalancingEngine {
    pub fn new(costs: TradingCosts) -> Self {
        Self {
            policy: Box::new(MomentumSelection),
            costs,
            cost_basis: CostBasis::default(),
        }
    }

    pub fn with_policy(mut self, policy: Box<dyn SelectionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cost_basis(mut self, cost_basis: CostBasis) -> Self {
        self.cost_basis = cost_basis;
        self
    }

    pub fn costs(&self) -> &TradingCosts {
        &self.costs
    }

    /// Turns category diffs into at most one whole-share trade per category.
    pub fn compute_suggestions(
        &self,
        valued_positions: &[ValuedPosition],
        targets: &RebalancingTarget,
        exchange_rate: Decimal,
    ) -> Vec<StockSuggestion> {
        let diffs = calculate_category_diffs(valued_positions, targets, exchange_rate);
        self.suggestions_for(&diffs, valued_positions, exchange_rate)
    }

    fn suggestions_for(
        &self,
        diffs: &[CategoryDiff],
        valued_positions: &[ValuedPosition],
        exchange_rate: Decimal,
    ) -> Vec<StockSuggestion> {
        diffs
            .iter()
            .filter(|d| d.action != TradeAction::None)
            .filter_map(|d| self.suggest(d, valued_positions, exchange_rate))
            .collect()
    }

    fn suggest(
        &self,
        diff: &CategoryDiff,
        valued_positions: &[ValuedPosition],
        exchange_rate: Decimal,
    ) -> Option<StockSuggestion> {
        let members: Vec<&ValuedPosition> = valued_positions
            .iter()
            .filter(|vp| vp.position.category() == diff.category)
            .collect();
        let pick = self.policy.select(&members, diff.action)?;

        let market = pick.position.market;
        let unit_price = to_reporting_currency(pick.price, market, exchange_rate);
        if unit_price <= Decimal::ZERO {
            debug!(
                "Skipping {} suggestion for {}: no usable price",
                diff.category, pick.position.ticker
            );
            return None;
        }

        let amount = diff.diff.abs();
        let whole_shares = (amount / unit_price).floor().to_u64().unwrap_or(u64::MAX);
        let quantity = match diff.action {
            TradeAction::Sell => whole_shares.min(pick.position.quantity),
            _ => whole_shares,
        };
        if quantity == 0 {
            return None;
        }

        Some(StockSuggestion {
            ticker: pick.position.ticker.clone(),
            display_name: pick.position.display_name.clone(),
            category: diff.category,
            market,
            action: diff.action,
            amount,
            quantity,
            current_price: pick.price,
            trade_value: Decimal::from(quantity) * unit_price,
        })
    }

    /// Projects the portfolio after executing every suggestion.
    ///
    /// Each suggestion is costed on the engine's [`CostBasis`]. Projected
    /// allocations apply the targets exactly to the post-cost total. Holdings
    /// are never touched.
    pub fn simulate(
        &self,
        valued_positions: &[ValuedPosition],
        targets: &RebalancingTarget,
        exchange_rate: Decimal,
    ) -> RebalancingSimulation {
        let category_diffs = calculate_category_diffs(valued_positions, targets, exchange_rate);
        let suggestions = self.suggestions_for(&category_diffs, valued_positions, exchange_rate);

        let total_trading_cost: Decimal = suggestions
            .iter()
            .map(|s| {
                let base = match self.cost_basis {
                    CostBasis::SuggestedAmount => s.amount,
                    CostBasis::TradeValue => s.trade_value,
                };
                self.costs.estimate(base, s.action)
            })
            .sum();
        let current_total_value: Decimal = aggregate_by_category(valued_positions, exchange_rate)
            .iter()
            .map(|a| a.value)
            .sum();
        let projected_total_value = current_total_value - total_trading_cost;

        let projected_allocations = targets
            .entries()
            .into_iter()
            .map(|(category, percent)| project(category, percent, projected_total_value))
            .collect();

        RebalancingSimulation {
            category_diffs,
            suggestions,
            total_trading_cost,
            current_total_value,
            projected_total_value,
            projected_allocations,
        }
    }
}

fn project(category: Category, percent: i32, total: Decimal) -> CategoryAllocation {
    let percentage = Decimal::from(percent);
    CategoryAllocation {
        category,
        category_id: category.id(),
        value: total * percentage / Decimal::ONE_HUNDRED,
        percentage,
    }
}

/// Suggestions under the momentum policy.
pub fn compute_suggestions(
    valued_positions: &[ValuedPosition],
    targets: &RebalancingTarget,
    exchange_rate: Decimal,
) -> Vec<StockSuggestion> {
    RebalancingEngine::default().compute_suggestions(valued_positions, targets, exchange_rate)
}

/// Simulation under the momentum policy and default fees.
pub fn simulate(
    valued_positions: &[ValuedPosition],
    targets: &RebalancingTarget,
    exchange_rate: Decimal,
) -> RebalancingSimulation {
    RebalancingEngine::default().simulate(valued_positions, targets, exchange_rate)
}

