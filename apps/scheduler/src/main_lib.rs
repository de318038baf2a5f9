use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};
use myfolio_core::jobs::DailySnapshotJob;
use myfolio_core::portfolio::snapshot::{SnapshotService, SnapshotServiceTrait};
use myfolio_core::positions::PositionRepositoryTrait;
use myfolio_core::quotes::{QuoteService, QuoteServiceTrait};
use myfolio_market_data::{MarketDataProvider, YahooProvider};
use myfolio_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, PositionRepository, SnapshotRepository,
};

pub struct AppState {
    pub snapshot_job: DailySnapshotJob,
}

pub fn init_tracing(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let position_repository: Arc<dyn PositionRepositoryTrait> =
        Arc::new(PositionRepository::new(pool.clone(), writer.clone()));
    let snapshot_repository = Arc::new(SnapshotRepository::new(pool.clone(), writer.clone()));
    let snapshot_service: Arc<dyn SnapshotServiceTrait> =
        Arc::new(SnapshotService::new(snapshot_repository));

    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooProvider::new()?);
    let quote_service: Arc<dyn QuoteServiceTrait> = Arc::new(QuoteService::new(
        provider,
        config.default_exchange_rate,
    ));

    let snapshot_job = DailySnapshotJob::new(position_repository, quote_service, snapshot_service);

    Ok(Arc::new(AppState { snapshot_job }))
}
