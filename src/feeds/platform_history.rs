use std::{collections::HashMap, io::BufRead, path::Path};

use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use tracing::{debug, info};

use super::{for_each_json_line, open, parse_int};
use crate::{error::ProcessorError, model::structures::observation::PlatformRatingPoint};

/// Game-type key holding the puzzle counter rather than a rating series.
pub const PUZZLE_KEY: &str = "puzzle";

/// Everything read from the platform rating feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformFeed {
    pub points: Vec<PlatformRatingPoint>,
    /// Puzzles played per user, when the feed reports it
    pub puzzles: HashMap<String, i64>
}

pub fn load_platform_history(path: &Path, min_year: i32) -> Result<PlatformFeed, ProcessorError> {
    info!("Reading platform rating history from {}", path.display());
    read_platform_history(open(path)?, min_year)
}

/// Reads every rating point dated in or after `min_year`.
pub fn read_platform_history<R: BufRead>(reader: R, min_year: i32) -> Result<PlatformFeed, ProcessorError> {
    let mut feed = PlatformFeed::default();
    let mut skipped = 0usize;

    for_each_json_line(reader, |line_no, object| {
        for (user_id, games) in object {
            let games = match games {
                Value::Object(games) => games,
                _ => {
                    debug!("Platform entry of {} on line {} is not an object", user_id, line_no);
                    continue;
                }
            };

            if let Some(n) = games.get(PUZZLE_KEY).and_then(|p| p.get("games")).and_then(parse_int) {
                feed.puzzles.insert(user_id.clone(), n);
            }

            for (game_type, game_data) in &games {
                let history = match game_data.get("rating_history") {
                    Some(Value::Object(history)) => history,
                    _ => continue
                };

                for (date_key, rating) in history {
                    let point = parse_shifted_date(date_key).zip(parse_int(rating));
                    match point {
                        Some((date, rating)) if date.year() >= min_year => feed.points.push(PlatformRatingPoint {
                            user_id: user_id.clone(),
                            game_type: game_type.clone(),
                            date,
                            rating
                        }),
                        Some(_) => {}
                        None => {
                            skipped += 1;
                            debug!(
                                "Skipping {} point {:?} of {} on line {}",
                                game_type, date_key, user_id, line_no
                            );
                        }
                    }
                }
            }
        }
    })?;

    info!(
        "Read {} platform rating points for {} users ({} skipped)",
        feed.points.len(),
        feed.puzzles.len(),
        skipped
    );
    Ok(feed)
}

/// Parses a `D-M-YYYY` key whose month is zero-based (`0` is January).
///
/// A day past the end of the month is lowered until the date exists,
/// so `31-1-2023` becomes 2023-02-28.
pub fn parse_shifted_date(key: &str) -> Option<NaiveDate> {
    let mut parts = key.trim().split('-');
    let day: u32 = parts.next()?.parse().ok()?;
    let month0: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let month = month0.checked_add(1).filter(|m| *m <= 12)?;

    (1..=day.min(31)).rev().find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

#[cfg(test)]
mod tests {
    use super::{parse_shifted_date, read_platform_history};
    use chrono::{Datelike, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_based_month() {
        assert_eq!(parse_shifted_date("1-0-2023"), Some(date(2023, 1, 1)));
        assert_eq!(parse_shifted_date("15-11-2023"), Some(date(2023, 12, 15)));
    }

    #[test]
    fn test_day_lowered_until_valid() {
        assert_eq!(parse_shifted_date("31-1-2023"), Some(date(2023, 2, 28)));
        assert_eq!(parse_shifted_date("31-1-2024"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!(parse_shifted_date("1-12-2023"), None);
        assert_eq!(parse_shifted_date("0-3-2023"), None);
        assert_eq!(parse_shifted_date("2023-01-01-x"), None);
        assert_eq!(parse_shifted_date("a-b-c"), None);
        assert_eq!(parse_shifted_date("1-2"), None);
    }

    #[test]
    fn test_reads_points_and_puzzles() {
        let input = r#"{"kim": {"puzzle": {"games": 120}, "blitz": {"rating_history": {"3-0-2023": 1500, "20-0-2023": 1530, "5-6-2022": 1400, "bad": 1}}, "bullet": {"games": 4}}}"#;

        let feed = read_platform_history(input.as_bytes(), 2023).unwrap();

        assert_eq!(feed.puzzles.get("kim"), Some(&120));
        assert_eq!(feed.points.len(), 2);
        assert!(feed.points.iter().all(|p| p.game_type == "blitz" && p.date.year() >= 2023));
    }
}
