/// Label used for ratings outside every bracket.
pub const UNKNOWN_LEVEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBracket {
    pub label: String,
    /// Inclusive
    pub low: i64,
    /// Inclusive
    pub high: i64
}

/// An ordered bracket table. Lookup returns the first bracket containing the rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBrackets {
    brackets: Vec<RatingBracket>
}

impl RatingBrackets {
    pub fn new(brackets: &[(&str, i64, i64)]) -> RatingBrackets {
        RatingBrackets {
            brackets: brackets
                .iter()
                .map(|(label, low, high)| RatingBracket {
                    label: label.to_string(),
                    low: *low,
                    high: *high
                })
                .collect()
        }
    }

    /// Federation table (Table A)
    pub fn fide() -> RatingBrackets {
        RatingBrackets::new(&[
            ("Beginner", 0, 1399),
            ("Intermedio", 1400, 1899),
            ("Avanzato", 1900, 2200),
            ("Master", 2201, 4000)
        ])
    }

    /// Online platform table (Table B)
    pub fn platform() -> RatingBrackets {
        RatingBrackets::new(&[
            ("too_low", 0, 1400),
            ("beginner", 1401, 1600),
            ("intermediate", 1601, 1800),
            ("advanced", 1801, 2200),
            ("expert", 2201, 2500),
            ("super_expert", 2501, 4000)
        ])
    }

    pub fn level(&self, rating: i64) -> &str {
        self.brackets
            .iter()
            .find(|b| b.low <= rating && rating <= b.high)
            .map(|b| b.label.as_str())
            .unwrap_or(UNKNOWN_LEVEL)
    }
}
