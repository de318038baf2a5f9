//! Positions module - holdings owned by a user.

mod positions_model;
mod positions_service;
mod positions_traits;

pub use positions_model::*;
pub use positions_service::*;
pub use positions_traits::*;

#[cfg(test)]
mod positions_model_tests;
