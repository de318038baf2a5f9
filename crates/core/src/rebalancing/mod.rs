//! Rebalancing engine - target-vs-actual diffs, stock-level suggestions and
//! a cost-aware what-if simulation.

pub mod rebalancing_calculator;
pub mod rebalancing_model;
pub mod rebalancing_service;
pub mod rebalancing_traits;
pub mod selection_policy;
pub mod trading_costs;

pub use rebalancing_calculator::*;
pub use rebalancing_model::*;
pub use rebalancing_service::*;
pub use rebalancing_traits::*;
pub use selection_policy::*;
pub use trading_costs::*;

#[cfg(test)]
mod rebalancing_calculator_tests;
