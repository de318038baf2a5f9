//! Category goals - absolute value targets per category.

mod goals_model;
mod goals_progress;

pub use goals_model::*;
pub use goals_progress::*;
