//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

/// Personal deadline tracker with reusable item templates.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskdeck", version)]
pub struct Config {
    /// SQLite database file. Uses a throwaway in-memory store when omitted.
    #[arg(long, env = "TASKDECK_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, env = "TASKDECK_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(
        long,
        env = "TASKDECK_LOG_LEVEL",
        default_value = taskdeck_core::default_log_level()
    )]
    pub log_level: String,

    /// Seed this many random items plus the stock templates before starting.
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub demo_items: usize,
}
