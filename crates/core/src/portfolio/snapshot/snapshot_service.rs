use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use log::{debug, info};
use std::sync::Arc;

use super::snapshot_builder::{build_snapshot, SnapshotPeriod};
use super::{Snapshot, SnapshotRepositoryTrait, SnapshotServiceTrait};
use crate::constants::SNAPSHOT_VALUE_EPSILON;
use crate::errors::Result;
use crate::portfolio::valuation::PortfolioTotals;

pub struct SnapshotService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl SnapshotService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Same-year snapshots strictly before `date`, ascending.
    fn year_history(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Snapshot>> {
        let year_start = SnapshotPeriod::Year.start_of(date);
        match date.pred_opt() {
            Some(day_before) if day_before >= year_start => {
                self.repository
                    .list_by_date_range(user_id, year_start, day_before)
            }
            _ => Ok(Vec::new()),
        }
    }

    fn snapshot_on(&self, user_id: &str, date: NaiveDate) -> Result<Option<Snapshot>> {
        Ok(self
            .repository
            .list_by_date_range(user_id, date, date)?
            .into_iter()
            .next())
    }
}

#[async_trait]
impl SnapshotServiceTrait for SnapshotService {
    async fn create_snapshot(
        &self,
        user_id: &str,
        date: NaiveDate,
        totals: PortfolioTotals,
    ) -> Result<Snapshot> {
        let previous = self.repository.get_latest_before(user_id, date)?;
        let history = self.year_history(user_id, date)?;

        let snapshot = build_snapshot(
            date,
            totals.total_value,
            totals.total_cost,
            previous.as_ref(),
            &history,
        );
        self.repository.upsert(user_id, &snapshot).await?;

        info!(
            "Stored snapshot for user {} on {}: value {} daily {}",
            user_id, date, snapshot.total_value, snapshot.daily_profit
        );
        Ok(snapshot)
    }

    async fn refresh_if_changed(
        &self,
        user_id: &str,
        date: NaiveDate,
        totals: PortfolioTotals,
    ) -> Result<Option<Snapshot>> {
        if let Some(existing) = self.snapshot_on(user_id, date)? {
            let moved = (existing.total_value - totals.total_value).abs();
            if moved <= SNAPSHOT_VALUE_EPSILON {
                debug!(
                    "Snapshot for user {} on {} unchanged (moved {})",
                    user_id, date, moved
                );
                return Ok(None);
            }
        }
        self.create_snapshot(user_id, date, totals).await.map(Some)
    }

    fn get_snapshots(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Snapshot>> {
        if start > end {
            return Ok(Vec::new());
        }
        self.repository.list_by_date_range(user_id, start, end)
    }

    fn get_latest_snapshot(&self, user_id: &str, date: NaiveDate) -> Result<Option<Snapshot>> {
        match date.checked_add_days(Days::new(1)) {
            Some(next_day) => self.repository.get_latest_before(user_id, next_day),
            None => self.snapshot_on(user_id, date),
        }
    }

    async fn reset(&self, user_id: &str) -> Result<usize> {
        let deleted = self.repository.delete_all_for_user(user_id).await?;
        info!("Deleted {} snapshots for user {}", deleted, user_id);
        Ok(deleted)
    }
}
