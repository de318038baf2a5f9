//! Position domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::categories::Category;
use crate::constants::{FOREIGN_CURRENCY, REPORTING_CURRENCY};
use crate::errors::{Error, Result, ValidationError};

/// Market a position trades on. Prices are always in this market's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Market {
    /// Priced in the reporting currency.
    Domestic,
    /// Priced in USD, converted with the exchange rate.
    Foreign,
}

impl Market {
    pub fn currency(&self) -> &'static str {
        match self {
            Market::Domestic => REPORTING_CURRENCY,
            Market::Foreign => FOREIGN_CURRENCY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Domestic => "DOMESTIC",
            Market::Foreign => "FOREIGN",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DOMESTIC" => Ok(Market::Domestic),
            "FOREIGN" => Ok(Market::Foreign),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown market '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a stock holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub user_id: String,
    pub ticker: String,
    pub display_name: String,
    pub quantity: u64,
    /// Average cost per share, market currency.
    pub average_cost: Decimal,
    /// Last-known price per share, market currency.
    pub current_price: Decimal,
    pub market: Market,
    pub category_id: Option<i32>,
}

impl Position {
    pub fn category(&self) -> Category {
        Category::from_id(self.category_id)
    }
}

/// Input model for creating a new position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub id: Option<String>,
    pub user_id: String,
    pub ticker: String,
    pub display_name: String,
    pub quantity: u64,
    pub average_cost: Decimal,
    pub current_price: Decimal,
    pub market: Market,
    pub category_id: Option<i32>,
}

impl NewPosition {
    /// Validates the new position data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        validate_fields(&self.ticker, self.average_cost, self.current_price)
    }
}

/// Input model for updating an existing position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub id: Option<String>,
    pub ticker: String,
    pub display_name: String,
    pub quantity: u64,
    pub average_cost: Decimal,
    pub current_price: Decimal,
    pub market: Market,
    pub category_id: Option<i32>,
}

impl PositionUpdate {
    /// Validates the position update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Position ID is required for updates".to_string(),
            )));
        }
        validate_fields(&self.ticker, self.average_cost, self.current_price)
    }
}

fn validate_fields(ticker: &str, average_cost: Decimal, current_price: Decimal) -> Result<()> {
    if ticker.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Ticker cannot be empty".to_string(),
        )));
    }
    if average_cost.is_sign_negative() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Average cost cannot be negative".to_string(),
        )));
    }
    if current_price.is_sign_negative() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Current price cannot be negative".to_string(),
        )));
    }
    Ok(())
}
