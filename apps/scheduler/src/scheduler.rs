//! Background scheduler for the daily portfolio snapshot pass.
//!
//! Waits a short initial delay so the process is fully up, then runs the
//! pass on a fixed interval. Dates are taken in the valuation timezone.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::main_lib::AppState;
use myfolio_core::jobs::DailySnapshotResult;
use myfolio_core::utils::time_utils::valuation_date_today;

/// Starts the snapshot scheduler on the Tokio runtime.
pub fn start_snapshot_scheduler(
    state: Arc<AppState>,
    initial_delay: Duration,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Snapshot scheduler started ({}s interval)",
            period.as_secs()
        );

        tokio::time::sleep(initial_delay).await;

        // First tick is immediate, subsequent ticks are `period` apart
        let mut snapshot_interval = interval(period);
        snapshot_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            snapshot_interval.tick().await;
            run_scheduled_snapshot(&state).await;
        }
    })
}

/// Runs a single snapshot pass for today. Never panics or propagates; the
/// outcome is logged.
pub async fn run_scheduled_snapshot(state: &Arc<AppState>) -> Option<DailySnapshotResult> {
    let today = valuation_date_today();
    info!("Running scheduled snapshot pass for {}", today);

    match state.snapshot_job.run(today).await {
        Ok(result) => {
            info!(
                "Snapshot pass for {} completed: {} stored, {} skipped, {} failed",
                today, result.success, result.skipped, result.failed
            );
            for failure in &result.errors {
                warn!(
                    "Snapshot for user {} failed: {}",
                    failure.user_id, failure.message
                );
            }
            Some(result)
        }
        Err(e) => {
            error!("Snapshot pass for {} aborted: {}", today, e);
            None
        }
    }
}
