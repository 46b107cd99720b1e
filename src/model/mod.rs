use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{info, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::utils::progress_utils::progress_bar;

use self::{
    config::AnalysisConfig,
    deltas::compute_deltas,
    quantiles::classify_cohorts,
    structures::{
        activity::ActivitySession,
        annual::{AnnualCommitmentRecord, AnnualJoinedRecord, CommitmentBinSummary},
        classification::Classified,
        delta_record::DeltaRecord,
        observation::{PlatformRatingPoint, RatingObservation, SeriesKey}
    },
    timeline::{build_timeline, collect_platform_series, collect_rating_series, MonthMap}
};

/// The flow of the engine:
/// correction → timeline → deltas → cohort quantiles,
/// commitment index, then the yearly join.
pub mod commitment;
pub mod config;
pub mod constants;
pub mod deltas;
pub mod global_delta;
pub mod quantiles;
pub mod rating_correction;
pub mod structures;
pub mod timeline;
pub mod yearly;

/// Builds every series' timeline and derives its deltas.
///
/// Series are independent, so they are processed in parallel. The merged
/// output is sorted by (user, game type, month).
pub fn monthly_deltas(series: &IndexMap<SeriesKey, MonthMap>, config: &AnalysisConfig) -> Vec<DeltaRecord> {
    let span = info_span!("monthly_deltas");
    progress_bar(&span, series.len() as u64, "Building monthly timelines");
    let _guard = span.enter();

    let entries = series.iter().collect_vec();
    let mut deltas: Vec<DeltaRecord> = entries
        .par_iter()
        .flat_map_iter(|(key, months)| {
            let timeline = build_timeline(months);
            span.pb_inc(1);
            compute_deltas(key, &timeline, &config.brackets)
        })
        .collect();

    deltas.sort_by(|a, b| {
        a.user_id
            .cmp(&b.user_id)
            .then_with(|| a.game_type.cmp(&b.game_type))
            .then(a.month.cmp(&b.month))
    });

    info!("Derived {} monthly deltas from {} series", deltas.len(), series.len());
    deltas
}

/// Federation feed: correct, build timelines, derive and classify deltas.
pub fn rating_history_deltas(
    observations: &[RatingObservation],
    config: &AnalysisConfig
) -> Vec<Classified<DeltaRecord>> {
    let series = collect_rating_series(observations, &config.game_type, &config.correction);
    info!("Collected {} rating series", series.len());

    classify_cohorts(monthly_deltas(&series, config))
}

/// Platform feed: the same monthly engine, one series per (user, game type).
pub fn platform_history_deltas(
    points: &[PlatformRatingPoint],
    config: &AnalysisConfig
) -> Vec<Classified<DeltaRecord>> {
    let series = collect_platform_series(points);
    info!("Collected {} platform series", series.len());

    classify_cohorts(monthly_deltas(&series, config))
}

/// Commitment records, the joined yearly table and its `1-CI` bin summary.
pub struct AnnualAnalysis {
    pub commitment: Vec<AnnualCommitmentRecord>,
    pub joined: Vec<AnnualJoinedRecord>,
    pub bins: Vec<CommitmentBinSummary>
}

pub fn annual_analysis<'a>(
    deltas: impl IntoIterator<Item = &'a DeltaRecord>,
    sessions: &[ActivitySession],
    config: &AnalysisConfig
) -> AnnualAnalysis {
    let commitment = commitment::commitment_records(sessions, &config.weights);
    let elo = yearly::annual_elo(deltas);
    let joined = yearly::join_annual(&commitment, &elo, config.delta_scale);
    let bins = yearly::commitment_bins(&joined);

    AnnualAnalysis {
        commitment,
        joined,
        bins
    }
}

#[cfg(test)]
mod tests {
    use super::{monthly_deltas, rating_history_deltas};
    use crate::{
        model::{
            config::AnalysisConfig,
            structures::{classification::QuartileNote, delta_record::ZeroDeltaReason, month::Month},
            timeline::collect_rating_series
        },
        utils::test_utils::{generate_observation, generate_observations}
    };

    #[test]
    fn test_gap_month_is_carried_forward() {
        let observations = vec![
            generate_observation("alice", Month::new(2024, 1).unwrap(), 1500, 2),
            generate_observation("alice", Month::new(2024, 3).unwrap(), 1550, 3),
        ];
        let mut config = AnalysisConfig::fide();
        // Keep the raw ratings untouched for this example
        config.correction.cutoff = Month::new(2030, 1).unwrap();

        let classified = rating_history_deltas(&observations, &config);

        assert_eq!(classified.len(), 2);
        let feb = &classified[0];
        assert_eq!(feb.record.delta_elo, 0);
        assert!(!feb.record.month_active);
        assert_eq!(feb.record.zero_delta_reason, Some(ZeroDeltaReason::NoGames));
        assert_eq!(feb.classification.delta_percentile, None);
        assert_eq!(feb.classification.quartile_note, Some(QuartileNote::InactiveMonth));

        let mar = &classified[1];
        assert_eq!(mar.record.delta_elo, 50);
        assert!(mar.record.month_active);
        assert_eq!(mar.classification.quartile_note, Some(QuartileNote::ActiveMonth));
    }

    #[test]
    fn test_monthly_deltas_sorted_and_complete() {
        let mut observations = generate_observations("u2", Month::new(2023, 1).unwrap(), 14, 7);
        observations.extend(generate_observations("u1", Month::new(2022, 6).unwrap(), 9, 11));
        let config = AnalysisConfig::fide();

        let series = collect_rating_series(&observations, &config.game_type, &config.correction);
        let deltas = monthly_deltas(&series, &config);

        let keys = deltas
            .iter()
            .map(|d| (d.user_id.clone(), d.month))
            .collect::<Vec<_>>();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        // One delta per month after each series' first month
        let expected: usize = series
            .values()
            .map(|m| Month::range_inclusive(m.first_month().unwrap(), m.last_month().unwrap()).count() - 1)
            .sum();
        assert_eq!(deltas.len(), expected);
    }
}
