use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{NewPositionDB, PositionChangesetDB, PositionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::positions;
use crate::schema::positions::dsl::*;
use myfolio_core::errors::{DatabaseError, Error, Result, ValidationError};
use myfolio_core::positions::{NewPosition, Position, PositionRepositoryTrait, PositionUpdate};

pub struct PositionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PositionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Writes last-known prices by ticker, for one owner or for every holder.
    async fn store_prices(
        &self,
        owner: Option<String>,
        prices: &HashMap<String, Decimal>,
    ) -> Result<usize> {
        if prices.is_empty() {
            return Ok(0);
        }
        let now = Utc::now().naive_utc();
        let updates: Vec<(String, String)> = prices
            .iter()
            .map(|(symbol, price)| (symbol.clone(), price.to_string()))
            .collect();

        let affected = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected_rows = 0;
                for (symbol, price) in updates {
                    let changes = (current_price.eq(price), updated_at.eq(now));
                    affected_rows += match owner.as_deref() {
                        Some(owner) => diesel::update(
                            positions
                                .filter(ticker.eq(symbol.as_str()))
                                .filter(user_id.eq(owner)),
                        )
                        .set(changes)
                        .execute(conn),
                        None => diesel::update(positions.filter(ticker.eq(symbol.as_str())))
                            .set(changes)
                            .execute(conn),
                    }
                    .map_err(StorageError::from)?;
                }
                Ok(affected_rows)
            })
            .await?;
        debug!(
            "Stored {} fresh prices across {} positions",
            prices.len(),
            affected
        );
        Ok(affected)
    }
}

fn to_domain(rows: Vec<PositionDB>) -> Result<Vec<Position>> {
    rows.into_iter()
        .map(|row| Position::try_from(row).map_err(Error::from))
        .collect()
}

#[async_trait]
impl PositionRepositoryTrait for PositionRepository {
    async fn create(&self, new_position: NewPosition) -> Result<Position> {
        let new_id = new_position
            .id
            .clone()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let row = NewPositionDB::from_domain(new_position, new_id, Utc::now().naive_utc())?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Position> {
                let created = diesel::insert_into(positions::table)
                    .values(&row)
                    .returning(PositionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Position::try_from(created)?)
            })
            .await
    }

    async fn update(&self, position_update: PositionUpdate) -> Result<Position> {
        let position_id = position_update.id.clone().ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("id".to_string()))
        })?;
        let changes = PositionChangesetDB::from_domain(position_update, Utc::now().naive_utc())?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Position> {
                let updated = diesel::update(positions.find(position_id.as_str()))
                    .set(&changes)
                    .returning(PositionDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Position {} not found",
                            position_id
                        )))
                    })?;
                Ok(Position::try_from(updated)?)
            })
            .await
    }

    async fn delete(&self, position_id: &str) -> Result<usize> {
        let position_id = position_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(positions.find(position_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn update_current_prices(&self, prices: &HashMap<String, Decimal>) -> Result<usize> {
        self.store_prices(None, prices).await
    }

    async fn update_current_prices_for_user(
        &self,
        owner: &str,
        prices: &HashMap<String, Decimal>,
    ) -> Result<usize> {
        self.store_prices(Some(owner.to_string()), prices).await
    }

    fn get_by_id(&self, position_id: &str) -> Result<Position> {
        let mut conn = get_connection(&self.pool)?;
        let row = positions
            .find(position_id)
            .select(PositionDB::as_select())
            .first::<PositionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Position {} not found",
                    position_id
                )))
            })?;
        Ok(Position::try_from(row)?)
    }

    fn list(&self, owner: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = positions
            .filter(user_id.eq(owner))
            .order((created_at.asc(), id.asc()))
            .select(PositionDB::as_select())
            .load::<PositionDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    fn list_user_ids(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(positions
            .select(user_id)
            .distinct()
            .order(user_id.asc())
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?)
    }
}
