use std::collections::BTreeMap;

use tracing::{debug, info, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use super::structures::classification::{Classification, Classified, QuantileBoundaries};
use crate::utils::progress_utils::progress_bar;

/// A record that can be judged against its cohort's delta distribution.
pub trait CohortMember {
    fn rating_level(&self) -> &str;
    fn game_type(&self) -> &str;
    fn delta(&self) -> i64;
    /// Only active records contribute to the cohort's quartiles.
    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CohortKey {
    pub rating_level: String,
    pub game_type: String
}

impl CohortKey {
    pub fn of<R: CohortMember>(record: &R) -> CohortKey {
        CohortKey {
            rating_level: record.rating_level().to_string(),
            game_type: record.game_type().to_string()
        }
    }
}

/// Linear-interpolation quantile of an ascending slice (`0 <= q <= 1`).
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Quartile boundaries of a set of deltas, or `None` when the set is empty.
pub fn boundaries_of(deltas: &[i64]) -> Option<QuantileBoundaries> {
    let mut sorted: Vec<f64> = deltas.iter().map(|d| *d as f64).collect();
    sorted.sort_by(f64::total_cmp);

    Some(QuantileBoundaries {
        q25: quantile(&sorted, 0.25)?,
        q50: quantile(&sorted, 0.50)?,
        q75: quantile(&sorted, 0.75)?,
        min: *sorted.first()?,
        max: *sorted.last()?
    })
}

/// Per-cohort boundaries computed from the active subset of every cohort.
///
/// A cohort seen only through inactive records maps to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortBoundaries {
    cohorts: BTreeMap<CohortKey, Option<QuantileBoundaries>>
}

impl CohortBoundaries {
    /// First phase: requires every record before anything can be labelled.
    pub fn collect<R: CohortMember>(records: &[R]) -> CohortBoundaries {
        let mut active_deltas: BTreeMap<CohortKey, Vec<i64>> = BTreeMap::new();
        for r in records {
            let deltas = active_deltas.entry(CohortKey::of(r)).or_default();
            if r.is_active() {
                deltas.push(r.delta());
            }
        }

        let cohorts = active_deltas
            .into_iter()
            .map(|(key, deltas)| {
                let boundaries = boundaries_of(&deltas);
                if boundaries.is_none() {
                    debug!(
                        "Cohort ({}, {}) has no active records, leaving it unclassified",
                        key.rating_level, key.game_type
                    );
                }
                (key, boundaries)
            })
            .collect::<BTreeMap<_, _>>();

        info!("Computed boundaries for {} cohorts", cohorts.len());
        CohortBoundaries { cohorts }
    }

    pub fn get(&self, key: &CohortKey) -> Option<&QuantileBoundaries> {
        self.cohorts.get(key).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CohortKey, Option<&QuantileBoundaries>)> {
        self.cohorts.iter().map(|(k, b)| (k, b.as_ref()))
    }

    /// A cohort without boundaries leaves all of its records unclassified,
    /// inactive ones included.
    pub fn classify<R: CohortMember>(&self, record: &R) -> Classification {
        let boundaries = match self.get(&CohortKey::of(record)) {
            Some(boundaries) => boundaries,
            None => return Classification::unclassifiable()
        };

        if !record.is_active() {
            return Classification::inactive();
        }

        let (bucket, low, high) = boundaries.bucket(record.delta());
        Classification::active(bucket, low, high)
    }
}

/// Second phase: labels every record against the boundaries from [`CohortBoundaries::collect`].
pub fn classify_records<R: CohortMember>(records: Vec<R>, boundaries: &CohortBoundaries) -> Vec<Classified<R>> {
    let span = info_span!("classify_records");
    progress_bar(&span, records.len() as u64, "Classifying deltas");
    let _guard = span.enter();

    records
        .into_iter()
        .map(|record| {
            let classification = boundaries.classify(&record);
            span.pb_inc(1);
            Classified { record, classification }
        })
        .collect()
}

/// Both phases, in order.
pub fn classify_cohorts<R: CohortMember>(records: Vec<R>) -> Vec<Classified<R>> {
    let boundaries = CohortBoundaries::collect(&records);
    classify_records(records, &boundaries)
}

#[cfg(test)]
mod tests {
    use super::{boundaries_of, classify_cohorts, quantile, CohortBoundaries, CohortKey, CohortMember};
    use crate::model::structures::classification::{Classification, PercentileBucket, QuartileNote};
    use approx::assert_abs_diff_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        level: &'static str,
        game: &'static str,
        delta: i64,
        active: bool
    }

    impl CohortMember for Row {
        fn rating_level(&self) -> &str {
            self.level
        }

        fn game_type(&self) -> &str {
            self.game
        }

        fn delta(&self) -> i64 {
            self.delta
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn row(level: &'static str, delta: i64, active: bool) -> Row {
        Row {
            level,
            game: "Standard",
            delta,
            active
        }
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [-20.0, -10.0, 0.0, 10.0, 30.0, 50.0];

        assert_abs_diff_eq!(quantile(&sorted, 0.25).unwrap(), -7.5);
        assert_abs_diff_eq!(quantile(&sorted, 0.50).unwrap(), 5.0);
        assert_abs_diff_eq!(quantile(&sorted, 0.75).unwrap(), 25.0);
        assert_abs_diff_eq!(quantile(&sorted, 0.0).unwrap(), -20.0);
        assert_abs_diff_eq!(quantile(&sorted, 1.0).unwrap(), 50.0);
    }

    #[test]
    fn test_quantile_single_and_empty() {
        assert_eq!(quantile(&[4.0], 0.75), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_boundaries_unsorted_input() {
        let b = boundaries_of(&[50, -10, 30, 0, -20, 10]).unwrap();

        assert_abs_diff_eq!(b.q25, -7.5);
        assert_abs_diff_eq!(b.q50, 5.0);
        assert_abs_diff_eq!(b.q75, 25.0);
        assert_abs_diff_eq!(b.min, -20.0);
        assert_abs_diff_eq!(b.max, 50.0);
    }

    #[test]
    fn test_inactive_records_excluded_from_boundaries() {
        let records = vec![
            row("Intermedio", -20, true),
            row("Intermedio", -10, true),
            row("Intermedio", 0, true),
            row("Intermedio", 10, true),
            row("Intermedio", 30, true),
            row("Intermedio", 50, true),
            // would drag every quartile down if counted
            row("Intermedio", -500, false),
            row("Intermedio", -500, false),
        ];

        let boundaries = CohortBoundaries::collect(&records);
        let b = boundaries
            .get(&CohortKey {
                rating_level: "Intermedio".to_string(),
                game_type: "Standard".to_string()
            })
            .unwrap();

        assert_abs_diff_eq!(b.q25, -7.5);
        assert_abs_diff_eq!(b.min, -20.0);
    }

    #[test]
    fn test_classify_example_cohort() {
        let records = vec![
            row("Intermedio", -20, true),
            row("Intermedio", -10, true),
            row("Intermedio", 0, true),
            row("Intermedio", 10, true),
            row("Intermedio", 30, true),
            row("Intermedio", 50, true),
        ];

        let classified = classify_cohorts(records);

        let ten = &classified[3];
        assert_eq!(ten.classification.delta_percentile, Some(PercentileBucket::UpperMiddle));
        assert_eq!(ten.classification.quartile_min, Some(5.0));
        assert_eq!(ten.classification.quartile_max, Some(25.0));
        assert_eq!(ten.classification.quartile_note, Some(QuartileNote::ActiveMonth));

        let lowest = &classified[0];
        assert_eq!(lowest.classification.delta_percentile, Some(PercentileBucket::Lowest));
        assert_eq!(lowest.classification.quartile_min, Some(-20.0));
        assert_eq!(lowest.classification.quartile_max, Some(-7.5));
    }

    #[test]
    fn test_inactive_record_never_labelled() {
        let records = vec![row("Avanzato", 10, true), row("Avanzato", 40, false)];

        let classified = classify_cohorts(records);

        assert_eq!(classified[1].classification, Classification::inactive());
        assert_eq!(classified[1].classification.delta_percentile, None);
        assert_eq!(classified[1].classification.quartile_min, None);
    }

    #[test]
    fn test_cohort_without_active_records() {
        let records = vec![row("Master", 0, false), row("Master", 0, false)];

        let boundaries = CohortBoundaries::collect(&records);
        assert_eq!(boundaries.len(), 1);
        assert!(boundaries.iter().all(|(_, b)| b.is_none()));

        let classified = classify_cohorts(records);
        assert!(classified
            .iter()
            .all(|c| c.classification == Classification::unclassifiable()));
        assert!(classified.iter().all(|c| c.classification.quartile_note.is_none()));
    }

    #[test]
    fn test_empty_cohort_does_not_affect_others() {
        let records = vec![
            row("Master", 0, false),
            row("Intermedio", 12, true),
            row("Intermedio", 0, false),
        ];

        let classified = classify_cohorts(records);

        assert_eq!(classified[0].classification, Classification::unclassifiable());
        assert_eq!(classified[1].classification.quartile_note, Some(QuartileNote::ActiveMonth));
        assert_eq!(classified[2].classification, Classification::inactive());
    }

    #[test]
    fn test_cohorts_are_independent() {
        let records = vec![
            row("Beginner", 100, true),
            row("Beginner", 200, true),
            row("Master", -5, true),
            row("Master", 5, true),
        ];

        let classified = classify_cohorts(records);

        // 100 is the lowest of its own cohort even though it beats every Master delta
        assert_eq!(classified[0].classification.delta_percentile, Some(PercentileBucket::Lowest));
        assert_eq!(classified[3].classification.delta_percentile, Some(PercentileBucket::Highest));
    }

    #[test]
    fn test_boundaries_shared_within_bucket() {
        let records = (0..40).map(|d| row("Intermedio", d % 13 - 6, d % 3 != 0)).collect::<Vec<_>>();

        let classified = classify_cohorts(records);

        for bucket in [
            PercentileBucket::Lowest,
            PercentileBucket::LowerMiddle,
            PercentileBucket::UpperMiddle,
            PercentileBucket::Highest
        ] {
            let ranges = classified
                .iter()
                .filter(|c| c.classification.delta_percentile == Some(bucket))
                .map(|c| (c.classification.quartile_min, c.classification.quartile_max))
                .collect::<Vec<_>>();

            assert!(ranges.windows(2).all(|w| w[0] == w[1]));
        }
    }
}
