use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{info, warn};

use super::{
    config::CommitmentWeights,
    constants::SCORE_DECIMALS,
    structures::{
        activity::{ActivitySession, SpeedCounts},
        annual::AnnualCommitmentRecord
    }
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitmentScore {
    pub frequency: f64,
    pub fast_quality: f64,
    pub ci: f64
}

/// Sums session counts per (user, year), keeping first-seen order.
pub fn aggregate_sessions(sessions: &[ActivitySession]) -> IndexMap<(String, i32), SpeedCounts> {
    let mut totals: IndexMap<(String, i32), SpeedCounts> = IndexMap::new();
    for s in sessions {
        *totals.entry((s.user.clone(), s.year)).or_default() += s.counts;
    }

    totals
}

/// The largest fast-format game count of any (user, year) in the population.
pub fn global_max_fast_games<'a>(totals: impl IntoIterator<Item = &'a SpeedCounts>) -> u64 {
    totals.into_iter().map(SpeedCounts::fast_games).max().unwrap_or(0)
}

/// Scores one user-year against the population maximum.
///
/// `fast_quality` divides by the full total, rapid included.
pub fn score(counts: &SpeedCounts, global_max_fast_games: u64, weights: &CommitmentWeights) -> CommitmentScore {
    let total = counts.total();
    if total == 0 {
        return CommitmentScore {
            frequency: 0.0,
            fast_quality: 0.0,
            ci: 0.0
        };
    }

    let frequency = if global_max_fast_games == 0 {
        0.0
    } else {
        (counts.fast_games() as f64 / global_max_fast_games as f64).min(1.0)
    };

    let fast_quality = (weights.w_ultra * counts.ultrabullet as f64
        + weights.w_bullet * counts.bullet as f64
        + weights.w_blitz * counts.blitz as f64)
        / total as f64;

    CommitmentScore {
        frequency,
        fast_quality,
        ci: weights.w_freq * frequency + weights.w_fast * fast_quality
    }
}

pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (value * factor).round() / factor
}

/// Builds every annual commitment record, sorted by (user, year).
///
/// The population maximum is fixed from all user-years before any
/// record is scored.
pub fn commitment_records(sessions: &[ActivitySession], weights: &CommitmentWeights) -> Vec<AnnualCommitmentRecord> {
    let totals = aggregate_sessions(sessions);
    let max_fast_games = global_max_fast_games(totals.values());

    if max_fast_games == 0 && !totals.is_empty() {
        warn!("No fast-format games in the activity feed, every frequency will be 0");
    }
    info!(
        "Scoring {} user-years (max fast games per year: {})",
        totals.len(),
        max_fast_games
    );

    totals
        .into_iter()
        .map(|((user, year), counts)| {
            let s = score(&counts, max_fast_games, weights);
            AnnualCommitmentRecord {
                user,
                year,
                frequency: round_score(s.frequency),
                fast_quality: round_score(s.fast_quality),
                ci: round_score(s.ci),
                fast_games: counts.fast_games(),
                max_fast_games,
                ultrabullet: counts.ultrabullet,
                bullet: counts.bullet,
                blitz: counts.blitz,
                rapid: counts.rapid,
                total: counts.total()
            }
        })
        .sorted_by(|a, b| a.user.cmp(&b.user).then(a.year.cmp(&b.year)))
        .collect()
}
