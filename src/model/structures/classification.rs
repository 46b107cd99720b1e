use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PercentileBucket {
    #[serde(rename = "0-25")]
    Lowest,
    #[serde(rename = "25-50")]
    LowerMiddle,
    #[serde(rename = "50-75")]
    UpperMiddle,
    #[serde(rename = "75-100")]
    Highest
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuartileNote {
    #[serde(rename = "active_month")]
    ActiveMonth,
    #[serde(rename = "inactive_month")]
    InactiveMonth
}

/// Quartile statistics of a cohort's active deltas.
/// Computed once per cohort and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileBoundaries {
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub min: f64,
    pub max: f64
}

impl QuantileBoundaries {
    /// Every upper edge is inclusive.
    /// Returns the bucket and the cohort-level range attached to it.
    pub fn bucket(&self, delta: i64) -> (PercentileBucket, f64, f64) {
        let delta = delta as f64;
        if delta <= self.q25 {
            (PercentileBucket::Lowest, self.min, self.q25)
        } else if delta <= self.q50 {
            (PercentileBucket::LowerMiddle, self.q25, self.q50)
        } else if delta <= self.q75 {
            (PercentileBucket::UpperMiddle, self.q50, self.q75)
        } else {
            (PercentileBucket::Highest, self.q75, self.max)
        }
    }
}

/// The label attached to one record by the cohort classifier.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Classification {
    pub delta_percentile: Option<PercentileBucket>,
    pub quartile_min: Option<f64>,
    pub quartile_max: Option<f64>,
    pub quartile_note: Option<QuartileNote>
}

impl Classification {
    pub fn inactive() -> Classification {
        Classification {
            quartile_note: Some(QuartileNote::InactiveMonth),
            ..Default::default()
        }
    }

    /// The cohort has no active records, so nothing can be judged against it.
    pub fn unclassifiable() -> Classification {
        Classification::default()
    }

    pub fn active(bucket: PercentileBucket, quartile_min: f64, quartile_max: f64) -> Classification {
        Classification {
            delta_percentile: Some(bucket),
            quartile_min: Some(quartile_min),
            quartile_max: Some(quartile_max),
            quartile_note: Some(QuartileNote::ActiveMonth)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classified<R> {
    pub record: R,
    pub classification: Classification
}
