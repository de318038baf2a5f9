//! Portfolio snapshot module - daily valuation time series.

pub mod snapshot_builder;
mod snapshot_model;
pub mod snapshot_service;
mod snapshot_traits;

pub use snapshot_builder::*;
pub use snapshot_model::*;
pub use snapshot_service::*;
pub use snapshot_traits::*;
