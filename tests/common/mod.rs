use std::{fs, path::Path, sync::Once};

use chess_progression::pipeline::PipelinePaths;

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Writes the JSONL fixtures into `dir` and returns the paths for one run.
pub fn write_fixtures(dir: &Path, rating_history: &str, activity: &str, platform_history: Option<&str>) -> PipelinePaths {
    let rating_path = dir.join("fide.jsonl");
    let activity_path = dir.join("activity.jsonl");
    fs::write(&rating_path, rating_history).unwrap();
    fs::write(&activity_path, activity).unwrap();

    let platform_path = platform_history.map(|content| {
        let path = dir.join("platform.jsonl");
        fs::write(&path, content).unwrap();
        path
    });

    PipelinePaths {
        rating_history: rating_path,
        activity: activity_path,
        platform_history: platform_path,
        output_dir: dir.join("out")
    }
}

/// Reads a produced CSV back as (headers, rows).
pub fn read_table(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();

    (headers, rows)
}
