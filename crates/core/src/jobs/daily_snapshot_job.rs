use chrono::NaiveDate;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::Result;
use crate::portfolio::snapshot::SnapshotServiceTrait;
use crate::portfolio::valuation::valuate_portfolio;
use crate::positions::{Position, PositionRepositoryTrait};
use crate::quotes::QuoteServiceTrait;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFailure {
    pub user_id: String,
    pub message: String,
}

/// Outcome of one pass over every user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySnapshotResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<UserFailure>,
}

/// Stores one snapshot per user for a given date.
///
/// Quotes and the exchange rate are fetched once for the whole pass. A failure
/// for one user is recorded and the pass moves on.
pub struct DailySnapshotJob {
    position_repository: Arc<dyn PositionRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    snapshot_service: Arc<dyn SnapshotServiceTrait>,
}

impl DailySnapshotJob {
    pub fn new(
        position_repository: Arc<dyn PositionRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        snapshot_service: Arc<dyn SnapshotServiceTrait>,
    ) -> Self {
        Self {
            position_repository,
            quote_service,
            snapshot_service,
        }
    }

    /// Runs a pass for `date`. Fails only when the user list cannot be read.
    pub async fn run(&self, date: NaiveDate) -> Result<DailySnapshotResult> {
        let started = Instant::now();
        let user_ids = self.position_repository.list_user_ids()?;
        info!(
            "Daily snapshot pass for {} started: {} users",
            date,
            user_ids.len()
        );

        let mut result = DailySnapshotResult::default();
        let mut portfolios: Vec<(String, Vec<Position>)> = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            match self.position_repository.list(&user_id) {
                Ok(positions) if positions.is_empty() => {
                    debug!("User {} has no positions, skipping", user_id);
                    result.skipped += 1;
                }
                Ok(positions) => portfolios.push((user_id, positions)),
                Err(e) => record_failure(&mut result, &user_id, e.to_string()),
            }
        }

        let tickers: Vec<String> = portfolios
            .iter()
            .flat_map(|(_, positions)| positions.iter().map(|p| p.ticker.clone()))
            .collect();
        let prices = self.fetch_prices(&tickers).await;
        let exchange_rate = self.quote_service.fetch_exchange_rate().await;
        if exchange_rate.is_fallback() {
            warn!(
                "Daily snapshot pass uses default exchange rate {}",
                exchange_rate.rate
            );
        }

        for (user_id, positions) in portfolios {
            let valuation = valuate_portfolio(&positions, &prices, exchange_rate.rate);
            match self
                .snapshot_service
                .create_snapshot(&user_id, date, valuation.totals())
                .await
            {
                Ok(_) => result.success += 1,
                Err(e) => record_failure(&mut result, &user_id, e.to_string()),
            }
        }

        info!(
            "Daily snapshot pass for {} finished in {:?}: {} stored, {} skipped, {} failed",
            date,
            started.elapsed(),
            result.success,
            result.skipped,
            result.failed
        );
        Ok(result)
    }

    /// Live prices for every distinct ticker, cached back onto the positions.
    async fn fetch_prices(&self, tickers: &[String]) -> HashMap<String, Decimal> {
        if tickers.is_empty() {
            return HashMap::new();
        }
        let batch = self.quote_service.fetch_quotes(tickers).await;
        if !batch.is_complete() {
            warn!(
                "{} tickers fell back to last-known prices: {:?}",
                batch.failed.len(),
                batch.failed
            );
        }

        let prices = batch.prices();
        if !prices.is_empty() {
            if let Err(e) = self
                .position_repository
                .update_current_prices(&prices)
                .await
            {
                warn!("Failed to store last-known prices: {}", e);
            }
        }
        prices
    }
}

fn record_failure(result: &mut DailySnapshotResult, user_id: &str, message: String) {
    error!("Daily snapshot failed for user {}: {}", user_id, message);
    result.failed += 1;
    result.errors.push(UserFailure {
        user_id: user_id.to_string(),
        message,
    });
}
