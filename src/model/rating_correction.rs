use super::{config::RatingCorrection, structures::month::Month};

impl RatingCorrection {
    /// Normalizes a raw federation rating onto the legacy scale.
    ///
    /// Ratings reported from the cutoff month onwards and below the threshold are
    /// on the revised scale and map back as `round(max(0, (raw - offset) / scale))`.
    /// Everything else passes through unchanged.
    pub fn correct(&self, raw_rating: i64, month: Month) -> f64 {
        if month >= self.cutoff && raw_rating < self.threshold {
            let legacy = (raw_rating as f64 - self.offset) / self.scale;
            return legacy.round().max(0.0);
        }

        raw_rating as f64
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{config::RatingCorrection, structures::month::Month};
    use approx::assert_abs_diff_eq;

    fn month(year: i32, m: u32) -> Month {
        Month::new(year, m).unwrap()
    }

    #[test]
    fn test_below_threshold_after_cutoff_is_rescaled() {
        let correction = RatingCorrection::default();
        assert_abs_diff_eq!(correction.correct(1800, month(2024, 6)), 1667.0);
    }

    #[test]
    fn test_cutoff_month_is_inclusive() {
        let correction = RatingCorrection::default();
        assert_abs_diff_eq!(correction.correct(1400, month(2024, 3)), 1000.0);
    }

    #[test]
    fn test_before_cutoff_passes_through() {
        let correction = RatingCorrection::default();
        assert_abs_diff_eq!(correction.correct(1800, month(2024, 2)), 1800.0);
    }

    #[test]
    fn test_at_threshold_passes_through() {
        let correction = RatingCorrection::default();
        assert_abs_diff_eq!(correction.correct(2000, month(2024, 6)), 2000.0);
        assert_abs_diff_eq!(correction.correct(2450, month(2025, 1)), 2450.0);
    }

    #[test]
    fn test_clamped_at_zero() {
        let correction = RatingCorrection::default();
        assert_abs_diff_eq!(correction.correct(500, month(2024, 6)), 0.0);
    }

    #[test]
    fn test_just_below_threshold() {
        let correction = RatingCorrection::default();
        // (1999 - 800) / 0.6 = 1998.33
        assert_abs_diff_eq!(correction.correct(1999, month(2024, 3)), 1998.0);
    }
}
