//! Database models for positions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use myfolio_core::positions::{Market, NewPosition, Position, PositionUpdate};

/// Database model for positions.
///
/// Money columns are TEXT so decimals round-trip without float drift.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub id: String,
    pub user_id: String,
    pub ticker: String,
    pub display_name: String,
    pub quantity: i64,
    pub average_cost: String,
    pub current_price: String,
    pub market: String,
    pub category_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new position
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
pub struct NewPositionDB {
    pub id: String,
    pub user_id: String,
    pub ticker: String,
    pub display_name: String,
    pub quantity: i64,
    pub average_cost: String,
    pub current_price: String,
    pub market: String,
    pub category_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable columns of a position. Owner and creation time never change.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(treat_none_as_null = true)]
pub struct PositionChangesetDB {
    pub ticker: String,
    pub display_name: String,
    pub quantity: i64,
    pub average_cost: String,
    pub current_price: String,
    pub market: String,
    pub category_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

fn quantity_to_db(quantity: u64) -> Result<i64, StorageError> {
    i64::try_from(quantity).map_err(|_| StorageError::CorruptColumn {
        column: "quantity",
        message: format!("{} exceeds the storable range", quantity),
    })
}

fn parse_decimal(column: &'static str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw).map_err(|e| StorageError::CorruptColumn {
        column,
        message: format!("'{}': {}", raw, e),
    })
}

impl TryFrom<PositionDB> for Position {
    type Error = StorageError;

    fn try_from(db: PositionDB) -> Result<Self, Self::Error> {
        let quantity = u64::try_from(db.quantity).map_err(|_| StorageError::CorruptColumn {
            column: "quantity",
            message: format!("negative quantity {}", db.quantity),
        })?;
        let market = Market::from_str(&db.market).map_err(|e| StorageError::CorruptColumn {
            column: "market",
            message: e.to_string(),
        })?;

        Ok(Self {
            average_cost: parse_decimal("average_cost", &db.average_cost)?,
            current_price: parse_decimal("current_price", &db.current_price)?,
            id: db.id,
            user_id: db.user_id,
            ticker: db.ticker,
            display_name: db.display_name,
            quantity,
            market,
            category_id: db.category_id,
        })
    }
}

impl NewPositionDB {
    pub fn from_domain(
        domain: NewPosition,
        id: String,
        now: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            id,
            quantity: quantity_to_db(domain.quantity)?,
            user_id: domain.user_id,
            ticker: domain.ticker.trim().to_string(),
            display_name: domain.display_name,
            average_cost: domain.average_cost.to_string(),
            current_price: domain.current_price.to_string(),
            market: domain.market.as_str().to_string(),
            category_id: domain.category_id,
            created_at: now,
            updated_at: now,
        })
    }
}

impl PositionChangesetDB {
    pub fn from_domain(domain: PositionUpdate, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            quantity: quantity_to_db(domain.quantity)?,
            ticker: domain.ticker.trim().to_string(),
            display_name: domain.display_name,
            average_cost: domain.average_cost.to_string(),
            current_price: domain.current_price.to_string(),
            market: domain.market.as_str().to_string(),
            category_id: domain.category_id,
            updated_at: now,
        })
    }
}
