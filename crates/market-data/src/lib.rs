//! MyFolio Market Data Crate
//!
//! Live price lookups for the valuation engine. The engine never calls a
//! provider directly: it receives a price map produced by the quote service in
//! `myfolio-core`, which drives a [`MarketDataProvider`] from this crate.
//!
//! # Core Types
//!
//! - [`Quote`] - Latest price with previous close for a single ticker
//! - [`MarketDataProvider`] - Trait implemented by quote sources
//! - [`YahooProvider`] - Yahoo Finance chart endpoint implementation
//! - [`MarketDataError`] - Per-ticker failure taxonomy

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
