use chess_progression::{
    args::Args,
    pipeline::{run, PipelinePaths}
};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log_level))
        .with(fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    match run(&PipelinePaths::from(&args)) {
        Ok(_) => {
            info!("Tables written to {}", args.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Processing failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
