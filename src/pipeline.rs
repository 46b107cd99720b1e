//! Pipeline orchestration
//!
//! Reads the feeds, runs the engine and writes every output table.
//! Stages:
//! 1. Feeds: rating history, activity and the optional platform history
//! 2. Monthly deltas per feed, each classified against its own cohorts
//! 3. Commitment index per user-year and the yearly join
//! 4. CSV tables in the output directory

use std::{fs, path::PathBuf};

use tracing::info;

use crate::{
    args::Args,
    error::ProcessorError,
    feeds::{activity::load_activity, platform_history::load_platform_history, rating_history::load_rating_history},
    model::{
        annual_analysis,
        config::AnalysisConfig,
        global_delta::global_deltas,
        platform_history_deltas,
        quantiles::classify_cohorts,
        rating_history_deltas
    },
    output::{
        rows::{GlobalDeltaRow, MonthlyDeltaRow},
        write_csv, ANNUAL_COMMITMENT_FILE, ANNUAL_JOINED_FILE, COMMITMENT_BINS_FILE, MONTHLY_DELTAS_FILE,
        PLATFORM_GLOBAL_DELTAS_FILE, PLATFORM_MONTHLY_DELTAS_FILE
    }
};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelinePaths {
    pub rating_history: PathBuf,
    pub activity: PathBuf,
    pub platform_history: Option<PathBuf>,
    pub output_dir: PathBuf
}

impl From<&Args> for PipelinePaths {
    fn from(args: &Args) -> Self {
        PipelinePaths {
            rating_history: args.rating_history.clone(),
            activity: args.activity.clone(),
            platform_history: args.platform_history.clone(),
            output_dir: args.output_dir.clone()
        }
    }
}

/// Row counts of every table written by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub monthly_deltas: usize,
    pub annual_commitment: usize,
    pub annual_joined: usize,
    pub commitment_bins: usize,
    /// `None` when no platform feed was given
    pub platform_monthly_deltas: Option<usize>,
    pub platform_global_deltas: Option<usize>
}

/// Runs the whole batch. Bad input records are skipped by the feeds;
/// only unreadable inputs or unwritable outputs fail the run.
pub fn run(paths: &PipelinePaths) -> Result<RunSummary, ProcessorError> {
    let fide = AnalysisConfig::fide();
    let platform = AnalysisConfig::platform();

    fs::create_dir_all(&paths.output_dir)?;
    let out = |name: &str| paths.output_dir.join(name);

    // Federation feed and commitment index
    let observations = load_rating_history(&paths.rating_history)?;
    let sessions = load_activity(&paths.activity)?;

    let classified = rating_history_deltas(&observations, &fide);
    let annual = annual_analysis(classified.iter().map(|c| &c.record), &sessions, &fide);

    let mut summary = RunSummary {
        monthly_deltas: write_csv(&out(MONTHLY_DELTAS_FILE), classified.iter().map(MonthlyDeltaRow::from))?,
        annual_commitment: write_csv(&out(ANNUAL_COMMITMENT_FILE), &annual.commitment)?,
        annual_joined: write_csv(&out(ANNUAL_JOINED_FILE), &annual.joined)?,
        commitment_bins: write_csv(&out(COMMITMENT_BINS_FILE), &annual.bins)?,
        ..Default::default()
    };

    // Platform feed, bracket Table B
    if let Some(path) = &paths.platform_history {
        let feed = load_platform_history(path, platform.min_platform_year)?;

        let monthly = platform_history_deltas(&feed.points, &platform);
        summary.platform_monthly_deltas = Some(write_csv(
            &out(PLATFORM_MONTHLY_DELTAS_FILE),
            monthly.iter().map(MonthlyDeltaRow::from)
        )?);

        let global = classify_cohorts(global_deltas(
            &feed.points,
            &feed.puzzles,
            &platform.brackets,
            platform.min_platform_year
        ));
        summary.platform_global_deltas = Some(write_csv(
            &out(PLATFORM_GLOBAL_DELTAS_FILE),
            global.iter().map(GlobalDeltaRow::from)
        )?);
    }

    info!("Run complete: {:?}", summary);
    Ok(summary)
}
