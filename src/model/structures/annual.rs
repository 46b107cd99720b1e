use serde::Serialize;

/// Yearly commitment scores for one user, from the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualCommitmentRecord {
    pub user: String,
    pub year: i32,
    pub frequency: f64,
    pub fast_quality: f64,
    #[serde(rename = "CI")]
    pub ci: f64,
    pub fast_games: u64,
    /// Population-wide maximum of `fast_games` used to normalize `frequency`
    pub max_fast_games: u64,
    pub ultrabullet: u64,
    pub bullet: u64,
    pub blitz: u64,
    pub rapid: u64,
    pub total: u64
}

/// Yearly rating progression for one user, rolled up from monthly deltas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualEloRecord {
    pub user_id: String,
    pub year: i32,
    /// Bracket of the year's first month
    pub rating_level: String,
    pub start_rating_year: i64,
    pub end_rating_year: i64,
    pub delta_elo_year: i64,
    pub active_months_year: u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualJoinedRecord {
    pub user: String,
    pub year: i32,
    pub frequency: f64,
    pub fast_quality: f64,
    #[serde(rename = "CI")]
    pub ci: f64,
    pub fast_games: u64,
    pub max_fast_games: u64,
    pub ultrabullet: u64,
    pub bullet: u64,
    pub blitz: u64,
    pub rapid: u64,
    pub total: u64,
    pub rating_level: String,
    pub start_rating_year: i64,
    pub end_rating_year: i64,
    pub delta_elo_year: i64,
    pub active_months_year: u32,
    #[serde(rename = "1-CI")]
    pub one_minus_ci: f64,
    pub delta_elo_year_scaled: f64
}

/// 75th percentile of the scaled yearly delta inside one `1-CI` bin of a rating level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitmentBinSummary {
    pub rating_level: String,
    pub bin_low: f64,
    pub bin_high: f64,
    pub bin_mid: f64,
    pub rows: usize,
    pub p75_delta_elo_year_scaled: f64
}
