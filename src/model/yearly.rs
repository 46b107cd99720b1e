use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use tracing::info;

use super::{
    constants::{CI_BIN_COUNT, CI_BIN_QUANTILE},
    quantiles::quantile,
    structures::{
        annual::{AnnualCommitmentRecord, AnnualEloRecord, AnnualJoinedRecord, CommitmentBinSummary},
        delta_record::DeltaRecord
    }
};

/// Rolls monthly deltas up into one record per (user, calendar year).
///
/// Within a year the earliest month gives the start rating and the latest
/// month the end rating. Output is sorted by (user, year).
pub fn annual_elo<'a>(records: impl IntoIterator<Item = &'a DeltaRecord>) -> Vec<AnnualEloRecord> {
    let ordered = records
        .into_iter()
        .sorted_by(|a, b| a.user_id.cmp(&b.user_id).then(a.month.cmp(&b.month)));
    let groups = ordered.chunk_by(|r| (r.user_id.as_str(), r.month.year()));

    let mut annual = Vec::new();
    for ((user_id, year), group) in &groups {
        let group = group.collect_vec();
        let (first, last) = match (group.first(), group.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => continue
        };

        annual.push(AnnualEloRecord {
            user_id: user_id.to_string(),
            year,
            rating_level: first.rating_level.clone(),
            start_rating_year: first.start_rating,
            end_rating_year: last.end_rating,
            delta_elo_year: last.end_rating - first.start_rating,
            active_months_year: group.iter().filter(|r| r.month_active).count() as u32
        });
    }

    annual
}

/// Inner join of commitment and rating years on (user, year).
///
/// Commitment years without fast-format games and rating years without an
/// active month are dropped first.
pub fn join_annual(
    commitment: &[AnnualCommitmentRecord],
    elo: &[AnnualEloRecord],
    delta_scale: f64
) -> Vec<AnnualJoinedRecord> {
    let active_elo: HashMap<(&str, i32), &AnnualEloRecord> = elo
        .iter()
        .filter(|e| e.active_months_year > 0)
        .map(|e| ((e.user_id.as_str(), e.year), e))
        .collect();

    let joined = commitment
        .iter()
        .filter(|c| c.fast_games > 0)
        .filter_map(|c| {
            let e = active_elo.get(&(c.user.as_str(), c.year))?;
            Some(AnnualJoinedRecord {
                user: c.user.clone(),
                year: c.year,
                frequency: c.frequency,
                fast_quality: c.fast_quality,
                ci: c.ci,
                fast_games: c.fast_games,
                max_fast_games: c.max_fast_games,
                ultrabullet: c.ultrabullet,
                bullet: c.bullet,
                blitz: c.blitz,
                rapid: c.rapid,
                total: c.total,
                rating_level: e.rating_level.clone(),
                start_rating_year: e.start_rating_year,
                end_rating_year: e.end_rating_year,
                delta_elo_year: e.delta_elo_year,
                active_months_year: e.active_months_year,
                one_minus_ci: 1.0 - c.ci,
                delta_elo_year_scaled: e.delta_elo_year as f64 / delta_scale
            })
        })
        .sorted_by(|a, b| a.user.cmp(&b.user).then(a.year.cmp(&b.year)))
        .collect_vec();

    info!(
        "Joined {} user-years ({} commitment, {} rating)",
        joined.len(),
        commitment.len(),
        elo.len()
    );
    joined
}

/// Index of the `1-CI` bin holding `value`.
///
/// Bins are right-closed (`(0.1, 0.2]`), the first one also holds 0.
pub fn ci_bin(value: f64) -> Option<usize> {
    if !(0.0..=1.0).contains(&value) {
        return None;
    }

    (0..CI_BIN_COUNT).find(|i| value <= bin_edge(i + 1))
}

fn bin_edge(i: usize) -> f64 {
    i as f64 / CI_BIN_COUNT as f64
}

/// 75th percentile of the scaled yearly delta per (rating level, `1-CI` bin).
pub fn commitment_bins(joined: &[AnnualJoinedRecord]) -> Vec<CommitmentBinSummary> {
    let mut bins: BTreeMap<(&str, usize), Vec<f64>> = BTreeMap::new();
    for j in joined {
        if let Some(bin) = ci_bin(j.one_minus_ci) {
            bins.entry((j.rating_level.as_str(), bin))
                .or_default()
                .push(j.delta_elo_year_scaled);
        }
    }

    bins.into_iter()
        .filter_map(|((rating_level, bin), mut values)| {
            values.sort_by(f64::total_cmp);
            let low = bin_edge(bin);
            let high = bin_edge(bin + 1);

            Some(CommitmentBinSummary {
                rating_level: rating_level.to_string(),
                bin_low: low,
                bin_high: high,
                bin_mid: (low + high) / 2.0,
                rows: values.len(),
                p75_delta_elo_year_scaled: quantile(&values, CI_BIN_QUANTILE)?
            })
        })
        .collect()
}
