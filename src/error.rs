use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid rating period: {0:?}")]
    InvalidPeriod(String),

    #[error("Invalid rating value: {0}")]
    InvalidRating(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String)
}
