use chrono::NaiveDate;

use super::month::Month;

/// A single rating report from the federation feed, before correction.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingObservation {
    pub user_id: String,
    pub month: Month,
    pub raw_rating: i64,
    pub games: u32
}

/// A single point from the platform's per-speed rating history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRatingPoint {
    pub user_id: String,
    pub game_type: String,
    pub date: NaiveDate,
    pub rating: i64
}

/// What a month map remembers for an observed month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyObservation {
    /// Corrected rating
    pub rating: f64,
    pub games: u32
}

/// Identifies one rating series: a user playing one game type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub user_id: String,
    pub game_type: String
}

impl SeriesKey {
    pub fn new(user_id: &str, game_type: &str) -> SeriesKey {
        SeriesKey {
            user_id: user_id.to_string(),
            game_type: game_type.to_string()
        }
    }
}
