use serde::Deserialize;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
}

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id. Riot stopped returning it for some platforms.
    #[serde(default)]
    pub id: Option<String>,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
}

// ============================================================================
// Match-v5
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    /// Seconds.
    pub game_duration: i64,
    pub queue_id: i32,
    pub participants: Vec<ParticipantDto>,
}

impl InfoDto {
    /// First participant entry for `puuid`. Duplicates are not validated.
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub win: bool,
}
