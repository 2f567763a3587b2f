//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use crate::db::{self, Repository, Summoner};
use crate::error::AppError;
use crate::riot::{
    AccountDto, InfoDto, LeagueEntryDto, MatchDto, ParticipantDto, RiotApi, SummonerDto,
};

pub fn match_with(queue_id: i32, duration: i64, players: &[(&str, bool)]) -> MatchDto {
    MatchDto {
        info: InfoDto {
            game_duration: duration,
            queue_id,
            participants: players
                .iter()
                .map(|(puuid, win)| ParticipantDto {
                    puuid: puuid.to_string(),
                    win: *win,
                })
                .collect(),
        },
    }
}

pub fn league_entry(queue_type: &str, tier: &str, rank: &str, lp: i32) -> LeagueEntryDto {
    LeagueEntryDto {
        queue_type: queue_type.to_string(),
        tier: tier.to_string(),
        rank: rank.to_string(),
        league_points: lp,
    }
}

/// Single-connection in-memory database with the schema applied.
pub async fn memory_repository() -> Repository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::run_migrations(&pool).await.unwrap();
    Repository::new(pool)
}

/// In-memory provider. `None` lists and unknown match ids behave like failed calls.
///
/// When `store` is set, the stored row is captured into `rows_at_listing` each
/// time match ids are listed.
#[derive(Default)]
pub struct FakeRiot {
    pub accounts: HashMap<(String, String), AccountDto>,
    pub match_ids: Option<Vec<String>>,
    pub matches: HashMap<String, MatchDto>,
    pub leagues: Option<Vec<LeagueEntryDto>>,
    pub summoner_fails: bool,
    pub requested_windows: Mutex<Vec<(i64, i64)>>,
    pub store: Option<Repository>,
    pub rows_at_listing: Mutex<Vec<Summoner>>,
}

impl FakeRiot {
    pub fn with_matches(matches: Vec<(&str, MatchDto)>) -> Self {
        Self {
            match_ids: Some(matches.iter().map(|(id, _)| id.to_string()).collect()),
            matches: matches
                .into_iter()
                .map(|(id, m)| (id.to_string(), m))
                .collect(),
            leagues: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn with_account(mut self, game_name: &str, tag_line: &str, puuid: &str) -> Self {
        self.accounts.insert(
            (game_name.to_string(), tag_line.to_string()),
            AccountDto {
                puuid: puuid.to_string(),
            },
        );
        self
    }

    pub fn with_leagues(mut self, leagues: Vec<LeagueEntryDto>) -> Self {
        self.leagues = Some(leagues);
        self
    }

    fn unavailable() -> AppError {
        AppError::RiotApi {
            status: 503,
            message: "Service Unavailable".into(),
        }
    }
}

#[async_trait]
impl RiotApi for FakeRiot {
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        self.accounts
            .get(&(game_name.to_string(), tag_line.to_string()))
            .cloned()
            .ok_or_else(|| AppError::PlayerNotFound {
                game_name: game_name.to_string(),
                tag_line: tag_line.to_string(),
            })
    }

    async fn summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        if self.summoner_fails {
            return Err(Self::unavailable());
        }
        Ok(SummonerDto {
            id: Some(format!("summoner-{puuid}")),
        })
    }

    async fn match_ids_between(
        &self,
        puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError> {
        self.requested_windows
            .lock()
            .unwrap()
            .push((start_time, end_time));

        if let Some(store) = &self.store {
            let row = store.find_by_puuid(puuid).await?;
            self.rows_at_listing.lock().unwrap().extend(row);
        }

        self.match_ids.clone().ok_or_else(Self::unavailable)
    }

    async fn match_by_id(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.matches
            .get(match_id)
            .cloned()
            .ok_or_else(Self::unavailable)
    }

    async fn league_entries(&self, _puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        self.leagues.clone().ok_or_else(Self::unavailable)
    }
}
