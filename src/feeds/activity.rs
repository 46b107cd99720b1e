use std::{io::BufRead, path::Path, str::FromStr};

use chrono::{DateTime, Datelike};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{for_each_json_line, open, parse_int};
use crate::{
    error::ProcessorError,
    model::structures::{
        activity::{ActivitySession, SpeedCounts},
        speed::Speed
    }
};

pub fn load_activity(path: &Path) -> Result<Vec<ActivitySession>, ProcessorError> {
    info!("Reading activity from {}", path.display());
    read_activity(open(path)?)
}

/// Reads one session per activity interval, bucketed by the UTC month of its start.
pub fn read_activity<R: BufRead>(reader: R) -> Result<Vec<ActivitySession>, ProcessorError> {
    let mut sessions = Vec::new();
    let mut skipped = 0usize;

    for_each_json_line(reader, |line_no, object| {
        for (user, intervals) in object {
            let intervals = match intervals {
                Value::Array(intervals) => intervals,
                _ => {
                    debug!("Activity of {} on line {} is not a list", user, line_no);
                    continue;
                }
            };

            for interval in &intervals {
                match parse_session(&user, interval) {
                    Ok(session) => sessions.push(session),
                    Err(e) => {
                        skipped += 1;
                        warn!("Skipping activity interval of {} on line {}: {}", user, line_no, e);
                    }
                }
            }
        }
    })?;

    info!("Read {} activity sessions ({} skipped)", sessions.len(), skipped);
    Ok(sessions)
}

fn parse_session(user: &str, interval: &Value) -> Result<ActivitySession, ProcessorError> {
    let start = interval.pointer("/interval/start");
    let start = start
        .and_then(parse_int)
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| ProcessorError::InvalidTimestamp(format!("{:?}", start)))?;

    let mut counts = SpeedCounts::default();
    if let Some(Value::Object(games)) = interval.get("games") {
        for (tag, result) in games {
            // Speeds outside the four tracked categories are ignored
            if let Ok(speed) = Speed::from_str(tag) {
                counts.add(speed, game_count(result));
            }
        }
    }

    Ok(ActivitySession {
        user: user.to_string(),
        year: start.year(),
        month: start.month(),
        counts
    })
}

/// `win + loss + draw`, each missing or malformed field counting as 0.
/// The sum saturates at `u64::MAX`.
fn game_count(result: &Value) -> u64 {
    ["win", "loss", "draw"]
        .iter()
        .filter_map(|k| result.get(k).and_then(parse_int))
        .fold(0u64, |acc, n| acc.saturating_add(n.max(0) as u64))
}
