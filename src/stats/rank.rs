use crate::db::RankInfo;
use crate::queue::Queue;
use crate::riot::LeagueEntryDto;

/// The rank snapshot for `queue`, or `None` when the player is unplaced in it.
pub fn rank_for_queue(entries: &[LeagueEntryDto], queue: Queue) -> Option<RankInfo> {
    entries
        .iter()
        .find(|entry| entry.queue_type == queue.league_label())
        .map(|entry| RankInfo {
            tier: entry.tier.clone(),
            rank: entry.rank.clone(),
            lp: entry.league_points,
        })
}
