//! Closed category catalog used for allocation and rebalancing.

mod categories_model;

pub use categories_model::*;
