//! MyFolio Core - valuation, snapshot and rebalancing engine.
//!
//! This crate contains the computation core of the portfolio tracker. It is
//! database-agnostic: persistence is reached only through the repository
//! traits defined here and implemented by the `storage-sqlite` crate, and live
//! prices only through the quote service wrapping `myfolio-market-data`.
//!
//! Data flow:
//!
//! ```text
//! positions + price map ──► valuation ──► allocation ──► rebalancing
//!                               │
//!                               └──► totals ──► snapshot builder ──► snapshot store
//! ```

pub mod categories;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod goals;
pub mod jobs;
pub mod portfolio;
pub mod positions;
pub mod quotes;
pub mod rebalancing;
pub mod utils;

// Re-export common types from the portfolio and position modules
pub use categories::Category;
pub use portfolio::*;
pub use positions::{Market, Position};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
