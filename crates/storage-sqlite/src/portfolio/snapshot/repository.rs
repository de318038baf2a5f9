use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::model::{PortfolioSnapshotDB, DATE_FORMAT};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use myfolio_core::errors::{Error, Result};
use myfolio_core::portfolio::snapshot::{Snapshot, SnapshotRepositoryTrait};

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn upsert(&self, owner: &str, snapshot: &Snapshot) -> Result<()> {
        use crate::schema::portfolio_snapshots::dsl::*;

        let row = PortfolioSnapshotDB::from_domain(owner, snapshot, Utc::now().naive_utc());
        debug!(
            "Saving snapshot {} for user {}",
            row.snapshot_date, row.user_id
        );
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(portfolio_snapshots)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    fn list_by_date_range(
        &self,
        owner: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Snapshot>> {
        use crate::schema::portfolio_snapshots::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_snapshots
            .filter(user_id.eq(owner))
            .filter(snapshot_date.ge(date_key(start)))
            .filter(snapshot_date.le(date_key(end)))
            .order(snapshot_date.asc())
            .select(PortfolioSnapshotDB::as_select())
            .load::<PortfolioSnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Snapshot::try_from(row).map_err(Error::from))
            .collect()
    }

    fn get_latest_before(&self, owner: &str, date: NaiveDate) -> Result<Option<Snapshot>> {
        use crate::schema::portfolio_snapshots::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let row = portfolio_snapshots
            .filter(user_id.eq(owner))
            .filter(snapshot_date.lt(date_key(date)))
            .order(snapshot_date.desc())
            .select(PortfolioSnapshotDB::as_select())
            .first::<PortfolioSnapshotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Snapshot::try_from).transpose()?)
    }

    async fn delete_all_for_user(&self, owner: &str) -> Result<usize> {
        use crate::schema::portfolio_snapshots::dsl::*;

        let owner = owner.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(portfolio_snapshots.filter(user_id.eq(owner)))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
