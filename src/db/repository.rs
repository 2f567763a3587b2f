use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{NewSummoner, QueueStats, Summoner};
use crate::error::AppError;
use crate::queue::Queue;

const SUMMONER_COLUMN_NAMES: [&str; 15] = [
    "puuid",
    "summoner_id",
    "game_name",
    "tag_line",
    "soloq_wins",
    "soloq_losses",
    "soloq_tier",
    "soloq_rank",
    "soloq_lp",
    "flexq_wins",
    "flexq_losses",
    "flexq_tier",
    "flexq_rank",
    "flexq_lp",
    "last_update",
];

fn summoner_columns() -> String {
    SUMMONER_COLUMN_NAMES.join(", ")
}

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_puuid(&self, puuid: &str) -> Result<Option<Summoner>, AppError> {
        let columns = summoner_columns();
        let summoner = sqlx::query_as::<_, Summoner>(&format!(
            "SELECT {columns} FROM summoners WHERE puuid = ?"
        ))
        .bind(puuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(summoner)
    }

    /// Case-insensitive on both parts; names are stored lower-cased.
    pub async fn find_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<Option<Summoner>, AppError> {
        let columns = summoner_columns();
        let summoner = sqlx::query_as::<_, Summoner>(&format!(
            "SELECT {columns} FROM summoners WHERE game_name = ? AND tag_line = ? ORDER BY id LIMIT 1"
        ))
        .bind(game_name.to_lowercase())
        .bind(tag_line.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;
        Ok(summoner)
    }

    /// Fails with [`AppError::AlreadyRegistered`] if the puuid is already stored.
    pub async fn insert(&self, new: &NewSummoner) -> Result<Summoner, AppError> {
        let columns = summoner_columns();
        let query = format!(
            r#"
            INSERT INTO summoners (
                puuid, summoner_id, game_name, tag_line,
                soloq_tier, soloq_rank, soloq_lp,
                flexq_tier, flexq_rank, flexq_lp,
                last_update
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {columns}
            "#
        );

        let solo = new.soloq_rank.as_ref();
        let flex = new.flexq_rank.as_ref();

        sqlx::query_as::<_, Summoner>(&query)
            .bind(&new.puuid)
            .bind(&new.summoner_id)
            .bind(new.game_name.to_lowercase())
            .bind(new.tag_line.to_lowercase())
            .bind(solo.map(|r| &r.tier))
            .bind(solo.map(|r| &r.rank))
            .bind(solo.map(|r| r.lp))
            .bind(flex.map(|r| &r.tier))
            .bind(flex.map(|r| &r.rank))
            .bind(flex.map(|r| r.lp))
            .bind(new.last_update)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::AlreadyRegistered {
                        game_name: new.game_name.clone(),
                        tag_line: new.tag_line.clone(),
                    }
                }
                other => AppError::Database(other),
            })
    }

    /// Overwrites a queue's counters and rank snapshot and stamps `last_update`.
    pub async fn upsert_queue_stats(
        &self,
        puuid: &str,
        queue: Queue,
        stats: &QueueStats,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let q = queue.as_str();
        let rank = stats.rank.as_ref();

        let result = sqlx::query(&format!(
            r#"
            UPDATE summoners SET
                {q}_wins = ?,
                {q}_losses = ?,
                {q}_tier = ?,
                {q}_rank = ?,
                {q}_lp = ?,
                last_update = ?
            WHERE puuid = ?
            "#
        ))
        .bind(stats.wins)
        .bind(stats.losses)
        .bind(rank.map(|r| &r.tier))
        .bind(rank.map(|r| &r.rank))
        .bind(rank.map(|r| r.lp))
        .bind(now)
        .bind(puuid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Database(sqlx::Error::RowNotFound));
        }
        Ok(())
    }

    /// Zeroes a queue's counters and stamps `last_update`. The rank snapshot is kept.
    pub async fn reset_queue_counters(
        &self,
        puuid: &str,
        queue: Queue,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let q = queue.as_str();

        let result = sqlx::query(&format!(
            "UPDATE summoners SET {q}_wins = 0, {q}_losses = 0, last_update = ? WHERE puuid = ?"
        ))
        .bind(now)
        .bind(puuid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Database(sqlx::Error::RowNotFound));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::db::RankInfo;
    use crate::testing::memory_repository;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, hour, 0, 0).unwrap()
    }

    fn gold() -> RankInfo {
        RankInfo {
            tier: "GOLD".into(),
            rank: "II".into(),
            lp: 40,
        }
    }

    fn new_summoner(puuid: &str, game_name: &str, tag_line: &str) -> NewSummoner {
        NewSummoner {
            puuid: puuid.into(),
            summoner_id: Some("sid".into()),
            game_name: game_name.into(),
            tag_line: tag_line.into(),
            soloq_rank: Some(gold()),
            flexq_rank: None,
            last_update: at(10),
        }
    }

    #[tokio::test]
    async fn insert_stores_lowercased_riot_id_and_zero_counters() {
        let repo = memory_repository().await;

        let summoner = repo
            .insert(&new_summoner("p1", "Faker", "KR1"))
            .await
            .unwrap();

        assert_eq!(summoner.riot_id(), "faker#kr1");
        assert_eq!(summoner.summoner_id.as_deref(), Some("sid"));
        assert_eq!(summoner.last_update, at(10));

        let solo = summoner.queue_stats(Queue::SoloDuo);
        assert_eq!((solo.wins, solo.losses), (0, 0));
        assert_eq!(solo.rank, Some(gold()));
        assert_eq!(summoner.queue_stats(Queue::Flex).rank, None);
    }

    #[tokio::test]
    async fn find_by_riot_id_ignores_case() {
        let repo = memory_repository().await;
        repo.insert(&new_summoner("p1", "faker", "kr1"))
            .await
            .unwrap();

        let found = repo.find_by_riot_id("FaKeR", "KR1").await.unwrap();
        assert_eq!(found.unwrap().puuid, "p1");

        assert!(repo.find_by_riot_id("faker", "euw").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_puuid_is_rejected() {
        let repo = memory_repository().await;
        repo.insert(&new_summoner("p1", "faker", "kr1"))
            .await
            .unwrap();

        let res = repo.insert(&new_summoner("p1", "FAKER", "KR1")).await;

        assert!(matches!(res, Err(AppError::AlreadyRegistered { .. })));
        assert!(repo.find_by_puuid("p1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn upsert_overwrites_counters_and_clears_rank_together() {
        let repo = memory_repository().await;
        repo.insert(&new_summoner("p1", "faker", "kr1"))
            .await
            .unwrap();

        let stats = QueueStats {
            wins: 3,
            losses: 2,
            rank: None,
        };
        repo.upsert_queue_stats("p1", Queue::SoloDuo, &stats, at(12))
            .await
            .unwrap();

        let summoner = repo.find_by_puuid("p1").await.unwrap().unwrap();
        assert_eq!(summoner.queue_stats(Queue::SoloDuo), stats);
        assert!(summoner.soloq_tier.is_none());
        assert!(summoner.soloq_rank.is_none());
        assert!(summoner.soloq_lp.is_none());
        assert_eq!(summoner.last_update, at(12));
        // Other queue untouched.
        assert_eq!(summoner.queue_stats(Queue::Flex), QueueStats::default());
    }

    #[tokio::test]
    async fn reset_zeroes_only_the_requested_queue() {
        let repo = memory_repository().await;
        repo.insert(&new_summoner("p1", "faker", "kr1"))
            .await
            .unwrap();
        let stats = QueueStats {
            wins: 5,
            losses: 1,
            rank: Some(gold()),
        };
        repo.upsert_queue_stats("p1", Queue::SoloDuo, &stats, at(11))
            .await
            .unwrap();
        repo.upsert_queue_stats("p1", Queue::Flex, &stats, at(11))
            .await
            .unwrap();

        repo.reset_queue_counters("p1", Queue::SoloDuo, at(13))
            .await
            .unwrap();

        let summoner = repo.find_by_puuid("p1").await.unwrap().unwrap();
        let solo = summoner.queue_stats(Queue::SoloDuo);
        assert_eq!((solo.wins, solo.losses), (0, 0));
        assert_eq!(solo.rank, Some(gold()));
        assert_eq!(summoner.queue_stats(Queue::Flex).wins, 5);
        assert_eq!(summoner.last_update, at(13));
    }

    #[tokio::test]
    async fn updates_on_unknown_puuid_fail() {
        let repo = memory_repository().await;

        let res = repo
            .reset_queue_counters("missing", Queue::Flex, at(1))
            .await;

        assert!(matches!(
            res,
            Err(AppError::Database(sqlx::Error::RowNotFound))
        ));
    }
}
