//! Database model for daily portfolio snapshots.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use myfolio_core::portfolio::snapshot::Snapshot;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
const CALCULATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Database model for a snapshot row, keyed by `(user_id, snapshot_date)`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::portfolio_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioSnapshotDB {
    pub user_id: String,
    pub snapshot_date: String,
    pub total_value: String,
    pub total_cost: String,
    pub total_profit: String,
    pub profit_rate: String,
    pub daily_profit: String,
    pub monthly_profit: String,
    pub yearly_profit: String,
    pub calculated_at: String,
}

impl PortfolioSnapshotDB {
    pub fn from_domain(user_id: &str, snapshot: &Snapshot, calculated_at: NaiveDateTime) -> Self {
        Self {
            user_id: user_id.to_string(),
            snapshot_date: snapshot.date.format(DATE_FORMAT).to_string(),
            total_value: snapshot.total_value.to_string(),
            total_cost: snapshot.total_cost.to_string(),
            total_profit: snapshot.total_profit.to_string(),
            profit_rate: snapshot.profit_rate.to_string(),
            daily_profit: snapshot.daily_profit.to_string(),
            monthly_profit: snapshot.monthly_profit.to_string(),
            yearly_profit: snapshot.yearly_profit.to_string(),
            calculated_at: calculated_at.format(CALCULATED_AT_FORMAT).to_string(),
        }
    }
}

fn decimal(column: &'static str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw).map_err(|e| StorageError::CorruptColumn {
        column,
        message: format!("'{}': {}", raw, e),
    })
}

impl TryFrom<PortfolioSnapshotDB> for Snapshot {
    type Error = StorageError;

    fn try_from(db: PortfolioSnapshotDB) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&db.snapshot_date, DATE_FORMAT).map_err(|e| {
            StorageError::CorruptColumn {
                column: "snapshot_date",
                message: format!("'{}': {}", db.snapshot_date, e),
            }
        })?;

        Ok(Self {
            date,
            total_value: decimal("total_value", &db.total_value)?,
            total_cost: decimal("total_cost", &db.total_cost)?,
            total_profit: decimal("total_profit", &db.total_profit)?,
            profit_rate: decimal("profit_rate", &db.profit_rate)?,
            daily_profit: decimal("daily_profit", &db.daily_profit)?,
            monthly_profit: decimal("monthly_profit", &db.monthly_profit)?,
            yearly_profit: decimal("yearly_profit", &db.yearly_profit)?,
        })
    }
}
