use std::collections::BTreeMap;

use indexmap::IndexMap;
use itertools::Itertools;

use super::{
    config::RatingCorrection,
    structures::{
        month::Month,
        observation::{MonthlyObservation, PlatformRatingPoint, RatingObservation, SeriesKey},
        timeline_entry::MonthlyTimelineEntry
    }
};

/// Observed months of one series, ordered by month.
///
/// Recording a month that is already present replaces it: the last
/// observation processed for a calendar month wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthMap {
    months: BTreeMap<Month, MonthlyObservation>
}

impl MonthMap {
    pub fn new() -> MonthMap {
        MonthMap::default()
    }

    pub fn record(&mut self, month: Month, observation: MonthlyObservation) {
        self.months.insert(month, observation);
    }

    pub fn get(&self, month: Month) -> Option<&MonthlyObservation> {
        self.months.get(&month)
    }

    pub fn first_month(&self) -> Option<Month> {
        self.months.keys().next().copied()
    }

    pub fn last_month(&self) -> Option<Month> {
        self.months.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Groups federation observations into one corrected month map per user,
/// scanning in source order. Users keep the order in which they first appear.
pub fn collect_rating_series(
    observations: &[RatingObservation],
    game_type: &str,
    correction: &RatingCorrection
) -> IndexMap<SeriesKey, MonthMap> {
    let mut series: IndexMap<SeriesKey, MonthMap> = IndexMap::new();

    for obs in observations {
        let rating = correction.correct(obs.raw_rating, obs.month);
        series
            .entry(SeriesKey::new(&obs.user_id, game_type))
            .or_default()
            .record(obs.month, MonthlyObservation { rating, games: obs.games });
    }

    series
}

/// Groups platform rating points into one month map per (user, game type).
///
/// Points are applied in date order (stable for equal dates), so the last point of a
/// month provides its rating. The month's game count is the number of points in it,
/// since the platform only records a point on days with rated play.
pub fn collect_platform_series(points: &[PlatformRatingPoint]) -> IndexMap<SeriesKey, MonthMap> {
    let mut grouped: IndexMap<SeriesKey, Vec<&PlatformRatingPoint>> = IndexMap::new();
    for p in points {
        grouped.entry(SeriesKey::new(&p.user_id, &p.game_type)).or_default().push(p);
    }

    grouped
        .into_iter()
        .map(|(key, series_points)| {
            let mut months = MonthMap::new();
            let by_month = series_points
                .into_iter()
                .sorted_by_key(|p| p.date)
                .chunk_by(|p| Month::from_date(p.date));

            for (month, month_points) in &by_month {
                let month_points = month_points.collect_vec();
                if let Some(last) = month_points.last() {
                    months.record(
                        month,
                        MonthlyObservation {
                            rating: last.rating as f64,
                            games: month_points.len() as u32
                        }
                    );
                }
            }

            (key, months)
        })
        .collect()
}

/// Expands observed months into a gap-free monthly sequence.
///
/// Observed months are emitted as effective with their own rating and games.
/// Months in between carry the last known rating forward with zero games.
pub fn build_timeline(months: &MonthMap) -> Vec<MonthlyTimelineEntry> {
    let (first, last) = match (months.first_month(), months.last_month()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new()
    };

    let mut last_rating: Option<f64> = None;
    Month::range_inclusive(first, last)
        .map(|month| match months.get(month) {
            Some(obs) => {
                last_rating = Some(obs.rating);
                MonthlyTimelineEntry {
                    month,
                    rating: Some(obs.rating),
                    games: obs.games,
                    month_effective: true
                }
            }
            None => MonthlyTimelineEntry {
                month,
                rating: last_rating,
                games: 0,
                month_effective: false
            }
        })
        .collect()
}
