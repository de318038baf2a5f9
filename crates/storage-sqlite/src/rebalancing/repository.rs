use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::RebalancingTargetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::rebalancing_targets::dsl::*;
use myfolio_core::errors::Result;
use myfolio_core::rebalancing::{RebalancingTarget, RebalancingTargetRepositoryTrait};

pub struct RebalancingTargetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RebalancingTargetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RebalancingTargetRepositoryTrait for RebalancingTargetRepository {
    fn get(&self, owner: &str) -> Result<Option<RebalancingTarget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = rebalancing_targets
            .find(owner)
            .select(RebalancingTargetDB::as_select())
            .first::<RebalancingTargetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(RebalancingTarget::from))
    }

    async fn put(&self, owner: &str, target: &RebalancingTarget) -> Result<()> {
        let row = RebalancingTargetDB::from_domain(owner, target, Utc::now().naive_utc());
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(rebalancing_targets)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
