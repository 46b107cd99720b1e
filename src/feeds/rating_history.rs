use std::{io::BufRead, path::Path};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{for_each_json_line, open, parse_int};
use crate::{
    error::ProcessorError,
    model::structures::{month::Month, observation::RatingObservation}
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RatingHistoryEntry {
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    standard: Option<StandardBlock>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StandardBlock {
    #[serde(default)]
    rating: Option<Value>,
    #[serde(default)]
    games: Option<Value>
}

pub fn load_rating_history(path: &Path) -> Result<Vec<RatingObservation>, ProcessorError> {
    info!("Reading rating history from {}", path.display());
    read_rating_history(open(path)?)
}

/// Reads every usable rating-history entry, keeping source order.
///
/// Entries with an unparseable period or rating are skipped one by one;
/// a missing or unparseable games count becomes 0.
pub fn read_rating_history<R: BufRead>(reader: R) -> Result<Vec<RatingObservation>, ProcessorError> {
    let mut observations = Vec::new();
    let mut skipped = 0usize;

    for_each_json_line(reader, |line_no, object| {
        for (user_id, user_info) in object {
            let history = match user_info.pointer("/FIDE_Profile/RatingHistory") {
                Some(Value::Array(history)) => history,
                _ => {
                    debug!("User {} on line {} has no rating history list", user_id, line_no);
                    continue;
                }
            };

            for entry in history {
                match parse_entry(&user_id, entry) {
                    Ok(obs) => observations.push(obs),
                    Err(e) => {
                        skipped += 1;
                        warn!("Skipping rating entry of {} on line {}: {}", user_id, line_no, e);
                    }
                }
            }
        }
    })?;

    info!(
        "Read {} rating observations ({} entries skipped)",
        observations.len(),
        skipped
    );
    Ok(observations)
}

fn parse_entry(user_id: &str, entry: &Value) -> Result<RatingObservation, ProcessorError> {
    let entry = RatingHistoryEntry::deserialize(entry)?;
    let month = Month::parse_period(entry.period.as_deref().unwrap_or_default())?;

    let (rating, games) = match entry.standard {
        Some(block) => (block.rating, block.games),
        None => (None, None)
    };
    let raw_rating = rating
        .as_ref()
        .and_then(parse_int)
        .ok_or_else(|| ProcessorError::InvalidRating(format!("{:?}", rating)))?;
    let games = games
        .as_ref()
        .and_then(parse_int)
        .and_then(|g| u32::try_from(g).ok())
        .unwrap_or(0);

    Ok(RatingObservation {
        user_id: user_id.to_string(),
        month,
        raw_rating,
        games
    })
}

#[cfg(test)]
mod tests {
    use super::read_rating_history;
    use crate::model::structures::month::Month;

    #[test]
    fn test_reads_string_and_integer_values() {
        let input = r#"{"u1": {"FIDE_Profile": {"RatingHistory": [
            {"Period": "2024-Jan", "Standard": {"Rating": "1500", "Games": "2"}},
            {"Period": "2024-Mar", "Standard": {"Rating": 1550, "Games": 3}}
        ]}}}"#
            .replace('\n', "");

        let observations = read_rating_history(input.as_bytes()).unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].user_id, "u1");
        assert_eq!(observations[0].month, Month::new(2024, 1).unwrap());
        assert_eq!(observations[0].raw_rating, 1500);
        assert_eq!(observations[0].games, 2);
        assert_eq!(observations[1].raw_rating, 1550);
        assert_eq!(observations[1].games, 3);
    }

    #[test]
    fn test_bad_entries_skipped_individually() {
        let input = r#"{"u1": {"FIDE_Profile": {"RatingHistory": [{"Period": "2024-Foo", "Standard": {"Rating": "1500"}}, {"Period": "2024-Feb", "Standard": {"Rating": "n/a"}}, {"Period": "2024-Apr", "Standard": {"Rating": "1610", "Games": "lots"}}, {"Period": "2024-May"}]}}}"#;

        let observations = read_rating_history(input.as_bytes()).unwrap();

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].month, Month::new(2024, 4).unwrap());
        assert_eq!(observations[0].games, 0);
    }

    #[test]
    fn test_missing_history_and_bad_lines() {
        let input = "{\"u1\": {\"FIDE_Profile\": {\"RatingHistory\": \"none\"}}}\n\
                     garbage\n\
                     {\"u2\": {}}\n\
                     {\"u3\": {\"FIDE_Profile\": {\"RatingHistory\": [{\"Period\": \"2023-Dec\", \"Standard\": {\"Rating\": 2100, \"Games\": -4}}]}}}\n";

        let observations = read_rating_history(input.as_bytes()).unwrap();

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].user_id, "u3");
        assert_eq!(observations[0].games, 0);
    }
}
