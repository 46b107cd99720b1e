use std::collections::HashMap;

use chrono::Datelike;
use indexmap::IndexMap;
use itertools::Itertools;

use super::structures::{
    global_delta::GlobalDeltaRecord,
    observation::{PlatformRatingPoint, SeriesKey},
    rating_level::RatingBrackets
};

/// First and last rating of every platform series from `min_year` onwards.
///
/// Series with no point inside the window are left out. The first point by
/// date sets the rating level. Output is sorted by (user, game type).
pub fn global_deltas(
    points: &[PlatformRatingPoint],
    puzzles: &HashMap<String, i64>,
    brackets: &RatingBrackets,
    min_year: i32
) -> Vec<GlobalDeltaRecord> {
    let mut series: IndexMap<SeriesKey, Vec<&PlatformRatingPoint>> = IndexMap::new();
    for p in points.iter().filter(|p| p.date.year() >= min_year) {
        series.entry(SeriesKey::new(&p.user_id, &p.game_type)).or_default().push(p);
    }

    series
        .into_iter()
        .filter_map(|(key, mut series_points)| {
            series_points.sort_by_key(|p| p.date);
            let first = series_points.first()?;
            let last = series_points.last()?;

            Some(GlobalDeltaRecord {
                n_puzzles: puzzles.get(&key.user_id).copied(),
                first_date: first.date,
                last_date: last.date,
                start_rating: first.rating,
                end_rating: last.rating,
                delta_rating: last.rating - first.rating,
                rating_level: brackets.level(first.rating).to_string(),
                user_id: key.user_id,
                game_type: key.game_type
            })
        })
        .sorted_by(|a, b| a.user_id.cmp(&b.user_id).then_with(|| a.game_type.cmp(&b.game_type)))
        .collect()
}
