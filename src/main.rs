use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use work_tracker::api::{AppState, create_router};
use work_tracker::config::{CONFIG_PATH_ENV, ConfigLoader, DEFAULT_CONFIG_PATH};
use work_tracker::store::{CachedStore, RestStore};
use work_tracker::tracker::WorkTracker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "work_tracker=info,tower_http=info".into()),
        )
        .init();

    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)
        .and_then(ConfigLoader::with_env_overrides)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    let store = CachedStore::new(RestStore::new(config.store()).context("building store client")?);
    let initial = config.initial_month()?;
    let tracker = WorkTracker::new(Arc::new(store), config.pay().clone(), initial)?;
    tracker.select(initial).await;

    let addr = config
        .server()
        .bind_address()
        .parse::<SocketAddr>()
        .context("parsing listen address")?;
    tracing::info!(
        %addr,
        year_month = %initial,
        daily_rate = %tracker.daily_rate(),
        "Starting work tracker"
    );

    let app = create_router(AppState::new(tracker));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
