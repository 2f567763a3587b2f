use async_trait::async_trait;

use crate::error::AppError;

mod client;
mod endpoints;
mod metrics;
mod region;
mod types;

pub use client::RiotClient;
pub use metrics::RequestMetrics;
pub use region::Platform;
pub use types::{AccountDto, LeagueEntryDto, MatchDto, SummonerDto};

#[cfg(test)]
pub use types::{InfoDto, ParticipantDto};

/// Provider operations the tracker depends on.
///
/// [`RiotClient`] is the production implementation. Routing (platform vs
/// regional) is resolved by the implementor.
#[async_trait]
pub trait RiotApi: Send + Sync {
    /// Account-v1. An unknown Riot ID yields [`AppError::PlayerNotFound`].
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError>;

    /// Summoner-v4.
    async fn summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError>;

    /// Match-v5 ids for matches started in `[start_time, end_time)`, unix seconds.
    async fn match_ids_between(
        &self,
        puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError>;

    /// Match-v5 detail.
    async fn match_by_id(&self, match_id: &str) -> Result<MatchDto, AppError>;

    /// League-v4 entries, one per ranked queue the player is placed in.
    async fn league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError>;
}
