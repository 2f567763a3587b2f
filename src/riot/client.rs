use std::{fmt, num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::metrics::RequestMetrics;
use super::region::Platform;
use super::types::{AccountDto, LeagueEntryDto, MatchDto, SummonerDto};
use super::RiotApi;
use crate::error::AppError;

#[derive(Clone)]
pub struct RiotClient {
    client: reqwest::Client,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    /// Riot API Key
    key: String,
    pub(super) platform_url: String,
    pub(super) regional_url: String,
    metrics: Arc<RequestMetrics>,
}

impl RiotClient {
    pub fn new(
        key: String,
        platform: Platform,
        rate_limit_per_second: NonZeroU32,
        metrics: Arc<RequestMetrics>,
    ) -> Self {
        let quota = Quota::per_second(rate_limit_per_second);

        Self {
            client: reqwest::Client::new(),
            limiter: Arc::new(RateLimiter::direct(quota)),
            key,
            platform_url: platform.base_url(),
            regional_url: platform.region().base_url(),
            metrics,
        }
    }

    /// Routes both platform and regional endpoints to `base_url`.
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.platform_url = base_url.clone();
        self.regional_url = base_url;
        self
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.metrics.clone()
    }

    /// Shared GET logic: rate limit, authenticate, and decode a 200 body.
    pub(super) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        self.limiter.until_ready().await;
        self.metrics.inc();

        tracing::trace!(url, "[RIOT::CLIENT] GET");

        let res = self
            .client
            .get(url)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            status => Err(AppError::RiotApi {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }),
        }
    }
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("platform_url", &self.platform_url)
            .field("regional_url", &self.regional_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        self.get_account_by_riot_id(game_name, tag_line).await
    }

    async fn summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        self.get_summoner_by_puuid(puuid).await
    }

    async fn match_ids_between(
        &self,
        puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError> {
        self.get_match_ids_between(puuid, start_time, end_time).await
    }

    async fn match_by_id(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.get_match(match_id).await
    }

    async fn league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        self.get_league_entries_by_puuid(puuid).await
    }
}
