use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS summoners (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    puuid TEXT UNIQUE NOT NULL,
    summoner_id TEXT,
    game_name TEXT NOT NULL,
    tag_line TEXT NOT NULL,
    soloq_wins INTEGER NOT NULL DEFAULT 0 CHECK (soloq_wins >= 0),
    soloq_losses INTEGER NOT NULL DEFAULT 0 CHECK (soloq_losses >= 0),
    soloq_tier TEXT,
    soloq_rank TEXT,
    soloq_lp INTEGER,
    flexq_wins INTEGER NOT NULL DEFAULT 0 CHECK (flexq_wins >= 0),
    flexq_losses INTEGER NOT NULL DEFAULT 0 CHECK (flexq_losses >= 0),
    flexq_tier TEXT,
    flexq_rank TEXT,
    flexq_lp INTEGER,
    last_update TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
);

CREATE INDEX IF NOT EXISTS idx_summoners_riot_id ON summoners(game_name, tag_line);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}
