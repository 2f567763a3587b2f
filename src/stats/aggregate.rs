use futures::{StreamExt, stream};
use tracing::{debug, instrument, warn};

use super::window::DailyWindow;
use crate::queue::Queue;
use crate::riot::{MatchDto, RiotApi};

/// Games shorter than this are remakes or early ends and never count.
pub const MIN_GAME_DURATION_SECS: i64 = 300;

/// Wins and losses over a set of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

/// Counts `puuid`'s results over the matches that qualify for `queue`.
pub fn tally<'a, I>(matches: I, puuid: &str, queue: Queue) -> Record
where
    I: IntoIterator<Item = &'a MatchDto>,
{
    matches
        .into_iter()
        .map(|m| &m.info)
        .filter(|info| info.queue_id == queue.queue_id())
        .filter(|info| info.game_duration >= MIN_GAME_DURATION_SECS)
        .filter_map(|info| info.participant(puuid))
        .fold(Record::default(), |mut record, participant| {
            if participant.win {
                record.wins += 1;
            } else {
                record.losses += 1;
            }
            record
        })
}

/// Fetches every match `puuid` started inside `window` and tallies it.
///
/// Provider failures never abort the aggregation: a failed id listing yields an
/// empty record, a failed detail fetch drops that match.
#[instrument(skip(riot, window), fields(start = %window.start(), end = %window.end(), match_count))]
pub async fn aggregate(
    riot: &dyn RiotApi,
    puuid: &str,
    queue: Queue,
    window: &DailyWindow,
    concurrency: usize,
) -> Record {
    let match_ids = match riot
        .match_ids_between(puuid, window.start_timestamp(), window.end_timestamp())
        .await
    {
        Ok(ids) => ids,
        Err(e) => {
            warn!(error = %e, "📊 ⚠️ Could not list matches, counting none");
            Vec::new()
        }
    };

    tracing::Span::current().record("match_count", match_ids.len());

    let matches: Vec<MatchDto> = stream::iter(match_ids)
        .map(|match_id| async move {
            match riot.match_by_id(&match_id).await {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(error = %e, match_id = %match_id, "📊 ⚠️ Skipping match, detail fetch failed");
                    None
                }
            }
        })
        .buffered(concurrency.max(1))
        .filter_map(|m| async move { m })
        .collect()
        .await;

    let record = tally(&matches, puuid, queue);
    debug!(wins = record.wins, losses = record.losses, "📊 Aggregated window");

    record
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::Santiago;

    use super::*;
    use crate::testing::{FakeRiot, match_with};

    const ME: &str = "me";

    #[test]
    fn counts_wins_and_losses_for_the_queue() {
        let matches = vec![
            match_with(420, 1800, &[(ME, true), ("x", false)]),
            match_with(420, 1700, &[("x", true), (ME, false)]),
            match_with(420, 1600, &[(ME, true)]),
        ];

        let record = tally(&matches, ME, Queue::SoloDuo);

        assert_eq!(record, Record { wins: 2, losses: 1 });
    }

    #[test]
    fn short_games_never_count() {
        let matches = vec![
            match_with(420, 299, &[(ME, true)]),
            match_with(420, 120, &[(ME, false)]),
            match_with(420, 300, &[(ME, false)]),
        ];

        assert_eq!(
            tally(&matches, ME, Queue::SoloDuo),
            Record { wins: 0, losses: 1 }
        );
    }

    #[test]
    fn other_queues_never_count() {
        let matches = vec![
            match_with(440, 1800, &[(ME, true)]),
            match_with(450, 1800, &[(ME, true)]),
            match_with(420, 1800, &[(ME, false)]),
        ];

        assert_eq!(
            tally(&matches, ME, Queue::SoloDuo),
            Record { wins: 0, losses: 1 }
        );
        assert_eq!(
            tally(&matches, ME, Queue::Flex),
            Record { wins: 1, losses: 0 }
        );
    }

    #[test]
    fn first_participant_entry_wins() {
        let matches = vec![match_with(420, 1800, &[(ME, true), (ME, false)])];

        assert_eq!(
            tally(&matches, ME, Queue::SoloDuo),
            Record { wins: 1, losses: 0 }
        );
    }

    #[test]
    fn matches_without_the_player_are_ignored() {
        let matches = vec![match_with(420, 1800, &[("someone", true)])];

        assert_eq!(tally(&matches, ME, Queue::SoloDuo), Record::default());
    }

    #[test]
    fn tally_is_idempotent() {
        let matches = vec![
            match_with(420, 1800, &[(ME, true)]),
            match_with(420, 200, &[(ME, true)]),
            match_with(420, 1800, &[(ME, false)]),
        ];

        assert_eq!(
            tally(&matches, ME, Queue::SoloDuo),
            tally(&matches, ME, Queue::SoloDuo)
        );
    }

    fn window() -> DailyWindow {
        DailyWindow::containing(&Santiago.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap(), 4)
    }

    #[tokio::test]
    async fn aggregate_skips_failed_detail_fetches() {
        let mut riot = FakeRiot::with_matches(vec![
            ("LA2_1", match_with(420, 1800, &[(ME, true)])),
            ("LA2_3", match_with(420, 1800, &[(ME, false)])),
        ]);
        riot.match_ids = Some(vec!["LA2_1".into(), "LA2_2".into(), "LA2_3".into()]);

        let record = aggregate(&riot, ME, Queue::SoloDuo, &window(), 2).await;

        assert_eq!(record, Record { wins: 1, losses: 1 });
    }

    #[tokio::test]
    async fn aggregate_passes_window_bounds() {
        let riot = FakeRiot::with_matches(vec![]);
        let window = window();

        aggregate(&riot, ME, Queue::Flex, &window, 4).await;

        let requested = riot.requested_windows.lock().unwrap().clone();
        assert_eq!(
            requested,
            vec![(window.start_timestamp(), window.end_timestamp())]
        );
    }

    #[tokio::test]
    async fn aggregate_counts_nothing_when_listing_fails() {
        let riot = FakeRiot {
            match_ids: None,
            ..Default::default()
        };

        let record = aggregate(&riot, ME, Queue::SoloDuo, &window(), 4).await;

        assert_eq!(record, Record::default());
    }
}
