use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{info, instrument, warn};

use crate::db::{NewSummoner, QueueStats, RankInfo, Repository, Summoner};
use crate::error::AppError;
use crate::queue::Queue;
use crate::riot::RiotApi;
use crate::stats::{self, DailyWindow};

#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub timezone: Tz,
    pub day_boundary_hour: u32,
    pub match_fetch_concurrency: usize,
}

/// Computes and persists daily queue records for registered summoners.
#[derive(Clone)]
pub struct Tracker {
    db: Repository,
    riot: Arc<dyn RiotApi>,
    settings: TrackerSettings,
}

/// The result of a stats query, rendered by its `Display` impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueReport {
    pub stats: QueueStats,
    pub updated_at: DateTime<Tz>,
}

impl fmt::Display for QueueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wins: {} / Losses: {} | ",
            self.stats.wins, self.stats.losses
        )?;

        match &self.stats.rank {
            Some(RankInfo { tier, rank, lp }) => write!(f, "{tier} {rank} ({lp} LP)")?,
            None => f.write_str("No league assigned")?,
        }

        write!(f, " (Updated {})", self.updated_at.format("%H:%M"))
    }
}

impl Tracker {
    pub fn new(db: Repository, riot: Arc<dyn RiotApi>, settings: TrackerSettings) -> Self {
        Self { db, riot, settings }
    }

    /// Recomputes today's record for `queue` and stores it.
    ///
    /// Counters are zeroed first when a boundary was crossed since the last
    /// update.
    #[instrument(skip(self, now), fields(riot_id = %format!("{}#{}", game_name, tag_line)))]
    pub async fn queue_stats(
        &self,
        queue: Queue,
        game_name: &str,
        tag_line: &str,
        now: DateTime<Utc>,
    ) -> Result<QueueReport, AppError> {
        let summoner = self
            .db
            .find_by_riot_id(game_name, tag_line)
            .await?
            .ok_or_else(|| AppError::SummonerNotRegistered {
                game_name: game_name.to_lowercase(),
                tag_line: tag_line.to_lowercase(),
            })?;

        let hour = self.settings.day_boundary_hour;
        let local_now = now.with_timezone(&self.settings.timezone);
        let last_update = summoner.last_update.with_timezone(&self.settings.timezone);

        if stats::crossed_boundary(&last_update, &local_now, hour) {
            let stale = summoner.queue_stats(queue);
            info!(
                puuid = %summoner.puuid,
                %queue,
                wins = stale.wins,
                losses = stale.losses,
                "📊 New day, resetting counters"
            );
            self.db
                .reset_queue_counters(&summoner.puuid, queue, now)
                .await?;
        }

        let window = DailyWindow::containing(&local_now, hour);
        let record = stats::aggregate(
            self.riot.as_ref(),
            &summoner.puuid,
            queue,
            &window,
            self.settings.match_fetch_concurrency,
        )
        .await;

        let rank = match self.riot.league_entries(&summoner.puuid).await {
            Ok(entries) => stats::rank_for_queue(&entries, queue),
            Err(e) => {
                warn!(error = %e, puuid = %summoner.puuid, "📊 ⚠️ Could not fetch league entries");
                None
            }
        };

        let stats = QueueStats {
            wins: record.wins,
            losses: record.losses,
            rank,
        };
        self.db
            .upsert_queue_stats(&summoner.puuid, queue, &stats, now)
            .await?;

        Ok(QueueReport {
            stats,
            updated_at: local_now,
        })
    }

    /// Resolves a Riot ID and stores it with its current rank in both queues.
    #[instrument(skip(self, now))]
    pub async fn register(
        &self,
        game_name: &str,
        tag_line: &str,
        now: DateTime<Utc>,
    ) -> Result<Summoner, AppError> {
        let game_name = game_name.trim().to_lowercase();
        let tag_line = tag_line.trim().to_lowercase();

        if game_name.is_empty() || tag_line.is_empty() {
            return Err(AppError::InvalidRequest(
                "summoner_name and tagline are required".into(),
            ));
        }

        let account = self.riot.account_by_riot_id(&game_name, &tag_line).await?;

        if self.db.find_by_puuid(&account.puuid).await?.is_some() {
            return Err(AppError::AlreadyRegistered {
                game_name,
                tag_line,
            });
        }

        let summoner = self.riot.summoner_by_puuid(&account.puuid).await?;
        let entries = self.riot.league_entries(&account.puuid).await?;

        let new = NewSummoner {
            summoner_id: summoner.id,
            soloq_rank: stats::rank_for_queue(&entries, Queue::SoloDuo),
            flexq_rank: stats::rank_for_queue(&entries, Queue::Flex),
            puuid: account.puuid,
            game_name,
            tag_line,
            last_update: now,
        };

        let stored = self.db.insert(&new).await?;
        info!(
            puuid = %stored.puuid,
            summoner_id = ?stored.summoner_id,
            riot_id = %stored.riot_id(),
            "📝 Summoner registered"
        );

        Ok(stored)
    }
}
