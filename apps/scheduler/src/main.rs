mod config;
mod main_lib;
mod scheduler;

use config::Config;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let state = build_state(&config).await?;

    if config.run_once {
        let result = scheduler::run_scheduled_snapshot(&state).await;
        return match result {
            Some(result) if result.failed == 0 => Ok(()),
            Some(result) => anyhow::bail!("{} user snapshots failed", result.failed),
            None => anyhow::bail!("snapshot pass aborted"),
        };
    }

    let handle = scheduler::start_snapshot_scheduler(
        state,
        config.initial_delay,
        config.snapshot_interval,
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping scheduler");
    handle.abort();
    Ok(())
}
