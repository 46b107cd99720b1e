use chrono::NaiveDate;
use serde::Serialize;

use super::CsvRow;
use crate::model::structures::{
    annual::{AnnualCommitmentRecord, AnnualJoinedRecord, CommitmentBinSummary},
    classification::{Classified, PercentileBucket, QuartileNote},
    delta_record::{DeltaRecord, ZeroDeltaReason},
    global_delta::GlobalDeltaRecord,
    month::Month
};

/// One line of a monthly delta table: the record, then its classification.
#[derive(Debug, Serialize)]
pub struct MonthlyDeltaRow<'a> {
    pub user_id: &'a str,
    pub game_type: &'a str,
    pub month: Month,
    pub start_rating: i64,
    pub end_rating: i64,
    pub delta_elo: i64,
    pub rating_level: &'a str,
    pub games_played: u32,
    pub month_effective: u8,
    pub month_active: u8,
    pub zero_delta_reason: Option<ZeroDeltaReason>,
    pub delta_percentile: Option<PercentileBucket>,
    pub quartile_min: Option<f64>,
    pub quartile_max: Option<f64>,
    pub quartile_note: Option<QuartileNote>
}

impl<'a> From<&'a Classified<DeltaRecord>> for MonthlyDeltaRow<'a> {
    fn from(c: &'a Classified<DeltaRecord>) -> Self {
        let r = &c.record;
        MonthlyDeltaRow {
            user_id: &r.user_id,
            game_type: &r.game_type,
            month: r.month,
            start_rating: r.start_rating,
            end_rating: r.end_rating,
            delta_elo: r.delta_elo,
            rating_level: &r.rating_level,
            games_played: r.games_played,
            month_effective: u8::from(r.month_effective),
            month_active: u8::from(r.month_active),
            zero_delta_reason: r.zero_delta_reason,
            delta_percentile: c.classification.delta_percentile,
            quartile_min: c.classification.quartile_min,
            quartile_max: c.classification.quartile_max,
            quartile_note: c.classification.quartile_note
        }
    }
}

impl CsvRow for MonthlyDeltaRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "user_id",
        "game_type",
        "month",
        "start_rating",
        "end_rating",
        "delta_elo",
        "rating_level",
        "games_played",
        "month_effective",
        "month_active",
        "zero_delta_reason",
        "delta_percentile",
        "quartile_min",
        "quartile_max",
        "quartile_note"
    ];
}

#[derive(Debug, Serialize)]
pub struct GlobalDeltaRow<'a> {
    pub user_id: &'a str,
    pub n_puzzles: Option<i64>,
    pub game_type: &'a str,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub start_rating: i64,
    pub end_rating: i64,
    pub delta_rating: i64,
    pub rating_level: &'a str,
    pub delta_percentile: Option<PercentileBucket>,
    pub quartile_min: Option<f64>,
    pub quartile_max: Option<f64>
}

impl<'a> From<&'a Classified<GlobalDeltaRecord>> for GlobalDeltaRow<'a> {
    fn from(c: &'a Classified<GlobalDeltaRecord>) -> Self {
        let r = &c.record;
        GlobalDeltaRow {
            user_id: &r.user_id,
            n_puzzles: r.n_puzzles,
            game_type: &r.game_type,
            first_date: r.first_date,
            last_date: r.last_date,
            start_rating: r.start_rating,
            end_rating: r.end_rating,
            delta_rating: r.delta_rating,
            rating_level: &r.rating_level,
            delta_percentile: c.classification.delta_percentile,
            quartile_min: c.classification.quartile_min,
            quartile_max: c.classification.quartile_max
        }
    }
}

impl CsvRow for GlobalDeltaRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "user_id",
        "n_puzzles",
        "game_type",
        "first_date",
        "last_date",
        "start_rating",
        "end_rating",
        "delta_rating",
        "rating_level",
        "delta_percentile",
        "quartile_min",
        "quartile_max"
    ];
}

impl CsvRow for AnnualCommitmentRecord {
    const HEADERS: &'static [&'static str] = &[
        "user",
        "year",
        "frequency",
        "fast_quality",
        "CI",
        "fast_games",
        "max_fast_games",
        "ultrabullet",
        "bullet",
        "blitz",
        "rapid",
        "total"
    ];
}

impl CsvRow for AnnualJoinedRecord {
    const HEADERS: &'static [&'static str] = &[
        "user",
        "year",
        "frequency",
        "fast_quality",
        "CI",
        "fast_games",
        "max_fast_games",
        "ultrabullet",
        "bullet",
        "blitz",
        "rapid",
        "total",
        "rating_level",
        "start_rating_year",
        "end_rating_year",
        "delta_elo_year",
        "active_months_year",
        "1-CI",
        "delta_elo_year_scaled"
    ];
}

impl CsvRow for CommitmentBinSummary {
    const HEADERS: &'static [&'static str] = &[
        "rating_level",
        "bin_low",
        "bin_high",
        "bin_mid",
        "rows",
        "p75_delta_elo_year_scaled"
    ];
}
