use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::{
    RebalancingEngine, RebalancingPreset, RebalancingServiceTrait, RebalancingSimulation,
    RebalancingTarget, RebalancingTargetRepositoryTrait, TradingCosts,
};
use crate::errors::Result;
use crate::portfolio::valuation::PortfolioValuation;

pub struct RebalancingService {
    repository: Arc<dyn RebalancingTargetRepositoryTrait>,
    engine: RebalancingEngine,
}

impl RebalancingService {
    pub fn new(
        repository: Arc<dyn RebalancingTargetRepositoryTrait>,
        costs: TradingCosts,
    ) -> Self {
        Self::with_engine(repository, RebalancingEngine::new(costs))
    }

    pub fn with_engine(
        repository: Arc<dyn RebalancingTargetRepositoryTrait>,
        engine: RebalancingEngine,
    ) -> Self {
        Self { repository, engine }
    }
}

#[async_trait]
impl RebalancingServiceTrait for RebalancingService {
    fn get_targets(&self, user_id: &str) -> Result<RebalancingTarget> {
        Ok(self.repository.get(user_id)?.unwrap_or_else(|| {
            debug!("No targets stored for user {}, using defaults", user_id);
            RebalancingTarget::default()
        }))
    }

    async fn save_targets(
        &self,
        user_id: &str,
        target: RebalancingTarget,
    ) -> Result<RebalancingTarget> {
        if target.total() != 100 {
            warn!(
                "Targets for user {} sum to {}%; saving as-is",
                user_id,
                target.total()
            );
        }
        self.repository.put(user_id, &target).await?;
        Ok(target)
    }

    async fn apply_preset(
        &self,
        user_id: &str,
        preset: RebalancingPreset,
    ) -> Result<RebalancingTarget> {
        self.save_targets(user_id, preset.targets()).await
    }

    fn simulate_for_user(
        &self,
        user_id: &str,
        valuation: &PortfolioValuation,
    ) -> Result<RebalancingSimulation> {
        let targets = self.get_targets(user_id)?;
        Ok(self
            .engine
            .simulate(&valuation.positions, &targets, valuation.exchange_rate))
    }
}
