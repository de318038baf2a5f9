//! Portfolio computation: valuation, allocation, snapshots and performance.

pub mod allocation;
pub mod performance;
pub mod snapshot;
pub mod valuation;

pub use allocation::*;
pub use performance::*;
pub use snapshot::*;
pub use valuation::*;
