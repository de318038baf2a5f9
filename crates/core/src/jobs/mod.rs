//! Background jobs driven by the scheduler binary.

mod daily_snapshot_job;

pub use daily_snapshot_job::*;
