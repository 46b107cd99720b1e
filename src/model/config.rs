use chrono::NaiveDate;

use super::{
    constants,
    structures::{month::Month, rating_level::RatingBrackets}
};

/// Mapping of post-revision ratings back onto the legacy scale.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingCorrection {
    /// First month reported on the new scale
    pub cutoff: Month,
    /// Ratings at or above this value are never rescaled
    pub threshold: i64,
    pub offset: f64,
    pub scale: f64
}

impl Default for RatingCorrection {
    fn default() -> Self {
        RatingCorrection {
            cutoff: Month::from_date(
                NaiveDate::from_ymd_opt(constants::CUTOFF_YEAR, constants::CUTOFF_MONTH, 1).unwrap_or_default()
            ),
            threshold: constants::CORRECTION_THRESHOLD,
            offset: constants::CORRECTION_OFFSET,
            scale: constants::CORRECTION_SCALE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitmentWeights {
    pub w_freq: f64,
    pub w_fast: f64,
    pub w_ultra: f64,
    pub w_bullet: f64,
    pub w_blitz: f64
}

impl Default for CommitmentWeights {
    fn default() -> Self {
        CommitmentWeights {
            w_freq: constants::W_FREQ,
            w_fast: constants::W_FAST,
            w_ultra: constants::W_ULTRA,
            w_bullet: constants::W_BULLET,
            w_blitz: constants::W_BLITZ
        }
    }
}

/// Immutable settings for one run of the engine.
///
/// Every stage takes the configuration by reference, so several
/// configurations (e.g. both bracket tables) can coexist in one process.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub correction: RatingCorrection,
    pub brackets: RatingBrackets,
    pub game_type: String,
    pub weights: CommitmentWeights,
    pub min_platform_year: i32,
    pub delta_scale: f64
}

impl AnalysisConfig {
    /// Federation feed: Table A brackets, standard time control.
    pub fn fide() -> AnalysisConfig {
        AnalysisConfig {
            correction: RatingCorrection::default(),
            brackets: RatingBrackets::fide(),
            game_type: constants::STANDARD_GAME_TYPE.to_string(),
            weights: CommitmentWeights::default(),
            min_platform_year: constants::MIN_PLATFORM_YEAR,
            delta_scale: constants::DELTA_YEAR_SCALE
        }
    }

    /// Platform feed: Table B brackets. Game types come from the feed itself.
    pub fn platform() -> AnalysisConfig {
        AnalysisConfig {
            brackets: RatingBrackets::platform(),
            ..AnalysisConfig::fide()
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig::fide()
    }
}

#[cfg(test)]
mod tests {
    use super::AnalysisConfig;
    use crate::model::structures::month::Month;

    #[test]
    fn test_default_cutoff() {
        let config = AnalysisConfig::default();
        assert_eq!(config.correction.cutoff, Month::new(2024, 3).unwrap());
        assert_eq!(config.correction.threshold, 2000);
    }

    #[test]
    fn test_platform_keeps_everything_but_brackets() {
        let fide = AnalysisConfig::fide();
        let platform = AnalysisConfig::platform();

        assert_eq!(platform.correction, fide.correction);
        assert_eq!(platform.weights, fide.weights);
        assert_ne!(platform.brackets, fide.brackets);
        assert_eq!(platform.brackets.level(1401), "beginner");
    }
}
