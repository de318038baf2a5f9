//! Allocation analysis - category buckets and their share of the portfolio.

mod allocation_calculator;
mod allocation_model;

pub use allocation_calculator::*;
pub use allocation_model::*;
