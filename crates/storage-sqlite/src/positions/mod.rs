//! SQLite storage implementation for positions.

mod model;
mod repository;

pub use model::{NewPositionDB, PositionChangesetDB, PositionDB};
pub use repository::PositionRepository;
