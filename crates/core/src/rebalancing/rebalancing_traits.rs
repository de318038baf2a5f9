use async_trait::async_trait;

use super::{RebalancingPreset, RebalancingSimulation, RebalancingTarget};
use crate::errors::Result;
use crate::portfolio::valuation::PortfolioValuation;

#[async_trait]
pub trait RebalancingTargetRepositoryTrait: Send + Sync {
    /// Stored targets, `None` when the user never saved any.
    fn get(&self, user_id: &str) -> Result<Option<RebalancingTarget>>;
    async fn put(&self, user_id: &str, target: &RebalancingTarget) -> Result<()>;
}

#[async_trait]
pub trait RebalancingServiceTrait: Send + Sync {
    /// Stored targets, or the defaults when none are stored.
    fn get_targets(&self, user_id: &str) -> Result<RebalancingTarget>;
    async fn save_targets(
        &self,
        user_id: &str,
        target: RebalancingTarget,
    ) -> Result<RebalancingTarget>;
    async fn apply_preset(
        &self,
        user_id: &str,
        preset: RebalancingPreset,
    ) -> Result<RebalancingTarget>;

    /// Simulates rebalancing a valued portfolio against the user's targets.
    fn simulate_for_user(
        &self,
        user_id: &str,
        valuation: &PortfolioValuation,
    ) -> Result<RebalancingSimulation>;
}
