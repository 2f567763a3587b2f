use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::MatchDto;

/// Match-v5 caps a single page of ids at 100.
const MAX_MATCH_IDS: u32 = 100;

impl RiotClient {
    /// Get the ids of matches started in `[start_time, end_time)` (unix seconds), newest first.
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match_ids_between(
        &self,
        puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?startTime={}&endTime={}&count={}",
            self.regional_url, puuid, start_time, end_time, MAX_MATCH_IDS
        );

        self.get(&url).await
    }

    /// Get match details by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = format!("{}/lol/match/v5/matches/{}", self.regional_url, match_id);

        self.get(&url).await
    }
}
