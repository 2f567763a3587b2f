use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::queue::Queue;

#[derive(Debug, Clone, FromRow)]
pub struct Summoner {
    pub puuid: String,
    pub summoner_id: Option<String>,
    pub game_name: String,
    pub tag_line: String,
    pub soloq_wins: u32,
    pub soloq_losses: u32,
    pub soloq_tier: Option<String>,
    pub soloq_rank: Option<String>,
    pub soloq_lp: Option<i32>,
    pub flexq_wins: u32,
    pub flexq_losses: u32,
    pub flexq_tier: Option<String>,
    pub flexq_rank: Option<String>,
    pub flexq_lp: Option<i32>,
    pub last_update: DateTime<Utc>,
}

impl Summoner {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }

    pub fn queue_stats(&self, queue: Queue) -> QueueStats {
        match queue {
            Queue::SoloDuo => QueueStats {
                wins: self.soloq_wins,
                losses: self.soloq_losses,
                rank: rank_info(&self.soloq_tier, &self.soloq_rank, self.soloq_lp),
            },
            Queue::Flex => QueueStats {
                wins: self.flexq_wins,
                losses: self.flexq_losses,
                rank: rank_info(&self.flexq_tier, &self.flexq_rank, self.flexq_lp),
            },
        }
    }
}

fn rank_info(tier: &Option<String>, rank: &Option<String>, lp: Option<i32>) -> Option<RankInfo> {
    match (tier, rank, lp) {
        (Some(tier), Some(rank), Some(lp)) => Some(RankInfo {
            tier: tier.clone(),
            rank: rank.clone(),
            lp,
        }),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankInfo {
    pub tier: String,
    /// Division within the tier (I to IV).
    pub rank: String,
    pub lp: i32,
}

/// One queue's counters and rank snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub wins: u32,
    pub losses: u32,
    pub rank: Option<RankInfo>,
}

/// A summoner about to be registered. Counters start at zero.
#[derive(Debug, Clone)]
pub struct NewSummoner {
    pub puuid: String,
    pub summoner_id: Option<String>,
    pub game_name: String,
    pub tag_line: String,
    pub soloq_rank: Option<RankInfo>,
    pub flexq_rank: Option<RankInfo>,
    pub last_update: DateTime<Utc>,
}
