pub mod cli;
pub mod commands;
pub mod config;
pub mod telemetry;

pub use cli::{Cli, Commands};
pub use commands::run;
pub use config::FetcherConfig;
