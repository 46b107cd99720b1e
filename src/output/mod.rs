//! Flat CSV tables. Each row type declares its header so an empty table still
//! gets one.

use std::{fs::File, io::Write, path::Path};

use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use crate::error::ProcessorError;

pub mod rows;

pub const MONTHLY_DELTAS_FILE: &str = "monthly_deltas.csv";
pub const PLATFORM_MONTHLY_DELTAS_FILE: &str = "platform_monthly_deltas.csv";
pub const PLATFORM_GLOBAL_DELTAS_FILE: &str = "platform_global_deltas.csv";
pub const ANNUAL_COMMITMENT_FILE: &str = "annual_commitment.csv";
pub const ANNUAL_JOINED_FILE: &str = "annual_joined.csv";
pub const COMMITMENT_BINS_FILE: &str = "commitment_bins.csv";

/// A record that can be written as one CSV line.
/// `HEADERS` must list the serialized field names in order.
pub trait CsvRow: Serialize {
    const HEADERS: &'static [&'static str];
}

impl<T: CsvRow> CsvRow for &T {
    const HEADERS: &'static [&'static str] = T::HEADERS;
}

pub fn write_rows<W: Write, T: CsvRow>(writer: W, rows: impl IntoIterator<Item = T>) -> Result<usize, ProcessorError> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(T::HEADERS)?;

    let mut n = 0;
    for row in rows {
        csv.serialize(row)?;
        n += 1;
    }

    csv.flush()?;
    Ok(n)
}

pub fn write_csv<T: CsvRow>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<usize, ProcessorError> {
    let n = write_rows(File::create(path)?, rows)?;
    info!("Wrote {} rows to {}", n, path.display());

    Ok(n)
}
