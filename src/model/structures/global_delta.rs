use chrono::NaiveDate;

use crate::model::quantiles::CohortMember;

/// First-to-last rating change of one platform series over the whole window.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDeltaRecord {
    pub user_id: String,
    pub n_puzzles: Option<i64>,
    pub game_type: String,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub start_rating: i64,
    pub end_rating: i64,
    pub delta_rating: i64,
    /// Bracket of `start_rating`
    pub rating_level: String
}

impl CohortMember for GlobalDeltaRecord {
    fn rating_level(&self) -> &str {
        &self.rating_level
    }

    fn game_type(&self) -> &str {
        &self.game_type
    }

    fn delta(&self) -> i64 {
        self.delta_rating
    }

    // Every series spans real play, so all of them feed the quartiles.
    fn is_active(&self) -> bool {
        true
    }
}
