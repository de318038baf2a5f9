//! SQLite storage implementation for rebalancing targets.

mod model;
mod repository;

pub use model::RebalancingTargetDB;
pub use repository::RebalancingTargetRepository;
