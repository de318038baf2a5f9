//! Repository and service traits for portfolio snapshots.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::Snapshot;
use crate::errors::Result;
use crate::portfolio::valuation::PortfolioTotals;

/// Repository trait for the per-user snapshot time series.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Inserts or replaces the snapshot keyed by `(user_id, snapshot.date)`.
    ///
    /// Must be atomic per key; concurrent writes for the same date converge to
    /// the last one.
    async fn upsert(&self, user_id: &str, snapshot: &Snapshot) -> Result<()>;

    /// Snapshots with `start <= date <= end`, ascending by date.
    fn list_by_date_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Snapshot>>;

    /// Most recent snapshot strictly before `date`.
    fn get_latest_before(&self, user_id: &str, date: NaiveDate) -> Result<Option<Snapshot>>;

    /// Deletes every snapshot of the user. Only used by an explicit data reset.
    async fn delete_all_for_user(&self, user_id: &str) -> Result<usize>;
}

/// Trait defining the contract for snapshot service operations.
#[async_trait]
pub trait SnapshotServiceTrait: Send + Sync {
    /// Builds and stores the snapshot for `date`, replacing any existing one.
    async fn create_snapshot(
        &self,
        user_id: &str,
        date: NaiveDate,
        totals: PortfolioTotals,
    ) -> Result<Snapshot>;

    /// Rewrites the snapshot for `date` only when none exists yet or the total
    /// value moved by more than the refresh threshold. Returns the stored
    /// snapshot when a write happened.
    async fn refresh_if_changed(
        &self,
        user_id: &str,
        date: NaiveDate,
        totals: PortfolioTotals,
    ) -> Result<Option<Snapshot>>;

    fn get_snapshots(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Snapshot>>;

    /// Latest snapshot on or before `date`.
    fn get_latest_snapshot(&self, user_id: &str, date: NaiveDate) -> Result<Option<Snapshot>>;

    /// Deletes the user's whole snapshot history.
    async fn reset(&self, user_id: &str) -> Result<usize>;
}
