use anyhow::{bail, Context};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

use myfolio_core::constants::DEFAULT_EXCHANGE_RATE;

const DEFAULT_DB_PATH: &str = "./db/myfolio.db";
const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_INITIAL_DELAY_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub log_format: LogFormat,
    pub snapshot_interval: Duration,
    pub initial_delay: Duration,
    /// Run a single snapshot pass and exit instead of scheduling.
    pub run_once: bool,
    /// USD/KRW rate used when the live rate cannot be fetched.
    pub default_exchange_rate: Decimal,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = var("MF_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let log_format = match var("MF_LOG_FORMAT") {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let interval_secs = parse_secs(
            var("MF_SNAPSHOT_INTERVAL_SECS"),
            "MF_SNAPSHOT_INTERVAL_SECS",
            DEFAULT_SNAPSHOT_INTERVAL_SECS,
        )?;
        if interval_secs == 0 {
            bail!("MF_SNAPSHOT_INTERVAL_SECS must be greater than zero");
        }
        let delay_secs = parse_secs(
            var("MF_SNAPSHOT_INITIAL_DELAY_SECS"),
            "MF_SNAPSHOT_INITIAL_DELAY_SECS",
            DEFAULT_INITIAL_DELAY_SECS,
        )?;

        let run_once = var("MF_RUN_ONCE")
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let default_exchange_rate = match var("MF_DEFAULT_EXCHANGE_RATE") {
            Some(raw) => Decimal::from_str(&raw)
                .with_context(|| format!("Invalid MF_DEFAULT_EXCHANGE_RATE '{}'", raw))?,
            None => DEFAULT_EXCHANGE_RATE,
        };
        if default_exchange_rate <= Decimal::ZERO {
            bail!("MF_DEFAULT_EXCHANGE_RATE must be positive");
        }

        Ok(Self {
            db_path,
            log_format,
            snapshot_interval: Duration::from_secs(interval_secs),
            initial_delay: Duration::from_secs(delay_secs),
            run_once,
            default_exchange_rate,
        })
    }
}

fn parse_secs(raw: Option<String>, key: &str, default: u64) -> anyhow::Result<u64> {
    match raw {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid {} '{}'", key, value)),
        None => Ok(default),
    }
}
