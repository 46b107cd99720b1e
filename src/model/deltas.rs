use itertools::Itertools;

use super::structures::{
    delta_record::{DeltaRecord, ZeroDeltaReason},
    observation::SeriesKey,
    rating_level::RatingBrackets,
    timeline_entry::MonthlyTimelineEntry
};

/// Derives one [`DeltaRecord`] per consecutive pair of timeline months.
///
/// Ratings are rounded to whole points before differencing, and the
/// rating level is taken from the earlier month of the pair. Pairs with a
/// missing rating on either side are skipped.
pub fn compute_deltas(
    key: &SeriesKey,
    timeline: &[MonthlyTimelineEntry],
    brackets: &RatingBrackets
) -> Vec<DeltaRecord> {
    timeline
        .iter()
        .tuple_windows()
        .filter_map(|(previous, current)| {
            let (start, end) = match (previous.rating, current.rating) {
                (Some(start), Some(end)) => (start.round() as i64, end.round() as i64),
                _ => return None
            };

            let delta_elo = end - start;
            let games_played = current.games;

            Some(DeltaRecord {
                user_id: key.user_id.clone(),
                game_type: key.game_type.clone(),
                month: current.month,
                start_rating: start,
                end_rating: end,
                delta_elo,
                rating_level: brackets.level(start).to_string(),
                games_played,
                month_effective: current.month_effective,
                month_active: games_played >= 1,
                zero_delta_reason: ZeroDeltaReason::classify(delta_elo, games_played)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::compute_deltas;
    use crate::model::structures::{
        delta_record::ZeroDeltaReason,
        month::Month,
        observation::SeriesKey,
        rating_level::RatingBrackets,
        timeline_entry::MonthlyTimelineEntry
    };

    fn entry(m: u32, rating: Option<f64>, games: u32, effective: bool) -> MonthlyTimelineEntry {
        MonthlyTimelineEntry {
            month: Month::new(2024, m).unwrap(),
            rating,
            games,
            month_effective: effective
        }
    }

    fn key() -> SeriesKey {
        SeriesKey::new("alice", "Standard")
    }

    #[test]
    fn test_carried_month_then_observed_month() {
        let timeline = vec![
            entry(1, Some(1500.0), 3, true),
            entry(2, Some(1500.0), 0, false),
            entry(3, Some(1550.0), 2, true),
        ];

        let deltas = compute_deltas(&key(), &timeline, &RatingBrackets::fide());

        assert_eq!(deltas.len(), 2);

        let feb = &deltas[0];
        assert_eq!(feb.month, Month::new(2024, 2).unwrap());
        assert_eq!(feb.delta_elo, 0);
        assert!(!feb.month_active);
        assert!(!feb.month_effective);
        assert_eq!(feb.zero_delta_reason, Some(ZeroDeltaReason::NoGames));
        assert_eq!(feb.rating_level, "Intermedio");

        let mar = &deltas[1];
        assert_eq!(mar.start_rating, 1500);
        assert_eq!(mar.end_rating, 1550);
        assert_eq!(mar.delta_elo, 50);
        assert!(mar.month_active);
        assert_eq!(mar.games_played, 2);
        assert_eq!(mar.zero_delta_reason, None);
    }

    #[test]
    fn test_zero_delta_with_games() {
        let timeline = vec![entry(1, Some(1200.0), 1, true), entry(2, Some(1200.0), 4, true)];

        let deltas = compute_deltas(&key(), &timeline, &RatingBrackets::fide());

        assert_eq!(deltas[0].zero_delta_reason, Some(ZeroDeltaReason::WithGames));
        assert_eq!(deltas[0].rating_level, "Beginner");
    }

    #[test]
    fn test_rounds_before_differencing() {
        let timeline = vec![entry(1, Some(1499.6), 1, true), entry(2, Some(1510.4), 1, true)];

        let deltas = compute_deltas(&key(), &timeline, &RatingBrackets::fide());

        assert_eq!(deltas[0].start_rating, 1500);
        assert_eq!(deltas[0].end_rating, 1510);
        assert_eq!(deltas[0].delta_elo, 10);
    }

    #[test]
    fn test_missing_rating_pair_skipped() {
        let timeline = vec![
            entry(1, None, 0, false),
            entry(2, Some(1500.0), 1, true),
            entry(3, Some(1490.0), 1, true),
        ];

        let deltas = compute_deltas(&key(), &timeline, &RatingBrackets::fide());

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].delta_elo, -10);
    }

    #[test]
    fn test_single_entry_has_no_delta() {
        let timeline = vec![entry(1, Some(1500.0), 1, true)];
        assert!(compute_deltas(&key(), &timeline, &RatingBrackets::fide()).is_empty());
    }
}
