//! Line-delimited JSON readers for the three input feeds.
//!
//! Every feed line is one JSON object keyed by user id. Malformed lines and
//! malformed entries are logged and skipped; only I/O failures abort a read.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path
};

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ProcessorError;

pub mod activity;
pub mod platform_history;
pub mod rating_history;

pub(crate) fn open(path: &Path) -> Result<BufReader<File>, ProcessorError> {
    Ok(BufReader::new(File::open(path)?))
}

/// Calls `f` with the 1-based line number and the top-level object of every
/// well-formed line. Blank lines are ignored.
pub(crate) fn for_each_json_line<R, F>(reader: R, mut f: F) -> Result<(), ProcessorError>
where
    R: BufRead,
    F: FnMut(usize, Map<String, Value>)
{
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(object)) => f(line_no, object),
            Ok(_) => warn!("Line {} is not a JSON object, skipping", line_no),
            Err(e) => warn!("Line {} is not valid JSON, skipping: {}", line_no, e)
        }
    }

    Ok(())
}

/// Reads an integer that the feeds may encode either as a JSON number or as a
/// (possibly padded) string.
pub(crate) fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None
    }
}
