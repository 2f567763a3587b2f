use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::SummonerDto;

impl RiotClient {
    /// Get summoner by PUUID
    pub async fn get_summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_url, puuid
        );

        self.get(&url).await
    }
}
