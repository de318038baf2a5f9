use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use super::valuation_calculator::valuate_portfolio;
use super::ValuationReport;
use crate::errors::Result;
use crate::positions::PositionRepositoryTrait;
use crate::quotes::QuoteServiceTrait;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Values a user's portfolio on live prices.
    ///
    /// Runs the two-step pull: fetch quotes for the user's tickers, then value
    /// the positions against the resulting price map. Tickers without a fresh
    /// quote are valued at their last-known price and listed as stale.
    ///
    /// Only persistence failures are returned as errors.
    async fn valuate_user(&self, user_id: &str) -> Result<ValuationReport>;
}

pub struct ValuationService {
    position_repository: Arc<dyn PositionRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl ValuationService {
    pub fn new(
        position_repository: Arc<dyn PositionRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            position_repository,
            quote_service,
        }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn valuate_user(&self, user_id: &str) -> Result<ValuationReport> {
        let started = Instant::now();
        let positions = self.position_repository.list(user_id)?;
        let exchange_rate = self.quote_service.fetch_exchange_rate().await;

        let prices = if positions.is_empty() {
            HashMap::new()
        } else {
            let tickers: Vec<String> = positions.iter().map(|p| p.ticker.clone()).collect();
            let batch = self.quote_service.fetch_quotes(&tickers).await;
            let prices = batch.prices();
            if !prices.is_empty() {
                self.position_repository
                    .update_current_prices_for_user(user_id, &prices)
                    .await?;
            }
            prices
        };

        let valuation = valuate_portfolio(&positions, &prices, exchange_rate.rate);
        if !valuation.stale_tickers.is_empty() {
            warn!(
                "User {} valued with last-known prices for {:?}",
                user_id, valuation.stale_tickers
            );
        }
        debug!(
            "Valued portfolio for user {} in {:?}",
            user_id,
            started.elapsed()
        );

        Ok(ValuationReport {
            valuation,
            exchange_rate,
        })
    }
}
