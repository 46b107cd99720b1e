use serde::Serialize;

use super::month::Month;
use crate::model::quantiles::CohortMember;

/// Why a month shows no rating change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZeroDeltaReason {
    #[serde(rename = "zero_with_games")]
    WithGames,
    #[serde(rename = "zero_no_games")]
    NoGames
}

impl ZeroDeltaReason {
    /// `None` whenever the delta is non-zero.
    pub fn classify(delta_elo: i64, games_played: u32) -> Option<ZeroDeltaReason> {
        match (delta_elo, games_played) {
            (0, 0) => Some(ZeroDeltaReason::NoGames),
            (0, _) => Some(ZeroDeltaReason::WithGames),
            _ => None
        }
    }
}

/// The rating change between two consecutive timeline months.
/// `month` is the later month of the pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRecord {
    pub user_id: String,
    pub game_type: String,
    pub month: Month,
    pub start_rating: i64,
    pub end_rating: i64,
    pub delta_elo: i64,
    /// Bracket of `start_rating`
    pub rating_level: String,
    pub games_played: u32,
    pub month_effective: bool,
    /// True iff at least one game was played in `month`
    pub month_active: bool,
    pub zero_delta_reason: Option<ZeroDeltaReason>
}

impl CohortMember for DeltaRecord {
    fn rating_level(&self) -> &str {
        &self.rating_level
    }

    fn game_type(&self) -> &str {
        &self.game_type
    }

    fn delta(&self) -> i64 {
        self.delta_elo
    }

    fn is_active(&self) -> bool {
        self.month_active
    }
}
