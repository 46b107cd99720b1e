use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Chess Progression",
    long_about = "Derives monthly rating deltas, cohort quartiles and a yearly commitment index \
    from federation rating histories and online activity"
)]
pub struct Args {
    /// Line-delimited JSON, one object per line keyed by user id, each holding
    /// FIDE_Profile.RatingHistory
    #[arg(short, long, env, help = "Federation rating-history feed (JSONL)")]
    pub rating_history: PathBuf,

    /// Line-delimited JSON keyed by user id, each holding a list of
    /// activity intervals with per-speed win/loss/draw counts
    #[arg(short, long, env, help = "Online activity feed (JSONL)")]
    pub activity: PathBuf,

    /// When given, also produces the platform monthly and global delta tables
    #[arg(short, long, env, help = "Online per-speed rating-history feed (JSONL)")]
    pub platform_history: Option<PathBuf>,

    #[arg(short, long, env, default_value = "output", help = "Directory receiving the CSV tables")]
    pub output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}
