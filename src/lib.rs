pub mod args;
pub mod error;
pub mod feeds;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod utils;
