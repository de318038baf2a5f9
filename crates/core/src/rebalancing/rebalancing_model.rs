use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::portfolio::allocation::CategoryAllocation;
use crate::positions::Market;

// ============================================================================
// Targets
// ============================================================================

/// Target weight per category, in whole percent.
///
/// Meant to sum to 100 but any sum (and negative weights) is accepted and
/// computed through as-is; see [`RebalancingTarget::total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingTarget {
    pub nasdaq100: i32,
    pub sp500: i32,
    pub dividend: i32,
}

impl Default for RebalancingTarget {
    fn default() -> Self {
        Self {
            nasdaq100: 50,
            sp500: 30,
            dividend: 20,
        }
    }
}

impl RebalancingTarget {
    pub fn new(nasdaq100: i32, sp500: i32, dividend: i32) -> Self {
        Self {
            nasdaq100,
            sp500,
            dividend,
        }
    }

    /// Targets in catalog order.
    pub fn entries(&self) -> [(Category, i32); 3] {
        [
            (Category::Nasdaq100, self.nasdaq100),
            (Category::Sp500, self.sp500),
            (Category::Dividend, self.dividend),
        ]
    }

    pub fn percent_for(&self, category: Category) -> Option<i32> {
        match category {
            Category::Nasdaq100 => Some(self.nasdaq100),
            Category::Sp500 => Some(self.sp500),
            Category::Dividend => Some(self.dividend),
            Category::Uncategorized => None,
        }
    }

    /// Sum of all weights. Anything other than 100 is a misconfiguration for
    /// the caller to surface; the engine never renormalizes.
    pub fn total(&self) -> i32 {
        self.nasdaq100 + self.sp500 + self.dividend
    }
}

/// Named target presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RebalancingPreset {
    Conservative,
    Balanced,
    Aggressive,
    Growth,
}

impl RebalancingPreset {
    pub const ALL: [RebalancingPreset; 4] = [
        RebalancingPreset::Conservative,
        RebalancingPreset::Balanced,
        RebalancingPreset::Aggressive,
        RebalancingPreset::Growth,
    ];

    pub fn targets(&self) -> RebalancingTarget {
        match self {
            RebalancingPreset::Conservative => RebalancingTarget::new(30, 30, 40),
            RebalancingPreset::Balanced => RebalancingTarget::new(40, 40, 20),
            RebalancingPreset::Aggressive => RebalancingTarget::new(60, 30, 10),
            RebalancingPreset::Growth => RebalancingTarget::new(70, 20, 10),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RebalancingPreset::Conservative => "Income-weighted, dividend heavy",
            RebalancingPreset::Balanced => "Even split between the two index sleeves",
            RebalancingPreset::Aggressive => "Growth tilted toward the Nasdaq 100",
            RebalancingPreset::Growth => "Concentrated in the Nasdaq 100",
        }
    }
}

// ============================================================================
// Engine output
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    None,
}

impl TradeAction {
    /// Direction implied by a category's `target - current` diff.
    pub fn from_diff(diff: Decimal) -> Self {
        if diff > Decimal::ZERO {
            TradeAction::Buy
        } else if diff < Decimal::ZERO {
            TradeAction::Sell
        } else {
            TradeAction::None
        }
    }
}

/// Target-vs-actual comparison for one target category, reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDiff {
    pub category: Category,
    pub current_value: Decimal,
    pub target_value: Decimal,
    /// `target_value - current_value`
    pub diff: Decimal,
    pub current_percent: Decimal,
    pub target_percent: Decimal,
    pub action: TradeAction,
}

/// Concrete whole-share trade for one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSuggestion {
    pub ticker: String,
    pub display_name: String,
    pub category: Category,
    pub market: Market,
    /// Always `Buy` or `Sell`.
    pub action: TradeAction,
    /// Category-level gap being closed, reporting currency
    pub amount: Decimal,
    pub quantity: u64,
    /// Price per share, market currency
    pub current_price: Decimal,
    /// `quantity × price` in the reporting currency
    pub trade_value: Decimal,
}

/// What-if projection of executing every suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingSimulation {
    pub category_diffs: Vec<CategoryDiff>,
    pub suggestions: Vec<StockSuggestion>,
    pub total_trading_cost: Decimal,
    pub current_total_value: Decimal,
    pub projected_total_value: Decimal,
    /// Targets applied exactly to the projected total
    pub projected_allocations: Vec<CategoryAllocation>,
}
