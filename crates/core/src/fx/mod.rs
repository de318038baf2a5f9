//! FX module - currency normalization into the reporting currency.

pub mod currency;
mod fx_model;

pub use currency::to_reporting_currency;
pub use fx_model::{ExchangeRate, RateSource};
