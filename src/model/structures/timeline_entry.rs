use super::month::Month;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTimelineEntry {
    pub month: Month,
    /// Carried forward from the last effective month when the month was not observed
    pub rating: Option<f64>,
    pub games: u32,
    /// True iff the month had a direct observation
    pub month_effective: bool
}
