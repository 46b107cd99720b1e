// Rating scale revision
pub const CUTOFF_YEAR: i32 = 2024;
pub const CUTOFF_MONTH: u32 = 3;
pub const CORRECTION_THRESHOLD: i64 = 2000;
pub const CORRECTION_OFFSET: f64 = 800.0;
pub const CORRECTION_SCALE: f64 = 0.60;
// Game type of the federation feed
pub const STANDARD_GAME_TYPE: &str = "Standard";
// Commitment index weights
pub const W_FREQ: f64 = 0.50;
pub const W_FAST: f64 = 0.50;
pub const W_ULTRA: f64 = 1.00;
pub const W_BULLET: f64 = 0.60;
pub const W_BLITZ: f64 = 0.30;
// Output scaling
pub const SCORE_DECIMALS: i32 = 4;
pub const DELTA_YEAR_SCALE: f64 = 10.0;
// Platform history window
pub const MIN_PLATFORM_YEAR: i32 = 2023;
// `1-CI` binning
pub const CI_BIN_COUNT: usize = 10;
pub const CI_BIN_QUANTILE: f64 = 0.75;
