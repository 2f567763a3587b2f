use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::AppError;

mod migrations;
mod models;
mod repository;

pub use migrations::run_migrations;
pub use models::{NewSummoner, QueueStats, RankInfo, Summoner};
pub use repository::Repository;

/// Opens the pool, creating the database file if it does not exist yet.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
