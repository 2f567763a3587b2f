use std::sync::Arc;

use config::Config;
use db::Repository;
use error::AppError;
use http::AppState;
use riot::{RequestMetrics, RiotClient};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracker::{Tracker, TrackerSettings};

mod config;
mod db;
mod error;
mod http;
mod logging;
mod queue;
mod riot;
mod stats;
mod tracker;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    logging::init()?;

    info!("🐙 Starting...");

    let config = Config::from_env()
        .inspect_err(|e| error!(error = %e, "⚙️ ❌ Invalid configuration"))?;
    info!(platform = %config.platform, timezone = %config.timezone, "⚙️ Configuration loaded");

    let pool = db::connect(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let riot = RiotClient::new(
        config.riot_api_key.clone(),
        config.platform,
        config.riot_rate_limit_per_second,
        RequestMetrics::new(),
    );
    tokio::spawn(riot.metrics().log_loop());

    let tracker = Tracker::new(
        Repository::new(pool),
        Arc::new(riot),
        TrackerSettings {
            timezone: config.timezone,
            day_boundary_hour: config.day_boundary_hour,
            match_fetch_concurrency: config.match_fetch_concurrency,
        },
    );
    let app = http::router(AppState::new(tracker, config.response_cache_ttl));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "🌐 Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
