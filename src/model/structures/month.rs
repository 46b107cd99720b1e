use std::{fmt, iter};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::ProcessorError;

/// A calendar month, normalized to its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Month> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Month)
    }

    pub fn from_date(date: NaiveDate) -> Month {
        Month(date - Days::new(u64::from(date.day0())))
    }

    /// Parses a rating-feed period such as `2024-Mar`.
    /// Month names are matched case-insensitively; full names are accepted too.
    pub fn parse_period(period: &str) -> Result<Month, ProcessorError> {
        let trimmed = period.trim();
        NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%b-%d")
            .map(Month)
            .map_err(|_| ProcessorError::InvalidPeriod(period.to_string()))
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn succ(&self) -> Option<Month> {
        self.0.checked_add_months(Months::new(1)).map(Month)
    }

    /// Every calendar month from `first` to `last`, both included.
    /// Empty when `first > last`.
    pub fn range_inclusive(first: Month, last: Month) -> impl Iterator<Item = Month> {
        iter::successors(Some(first), |m| m.succ()).take_while(move |m| *m <= last)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
