//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "axis", version, about = "Axis shaping CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/axis_config.toml")]
    pub config: PathBuf,

    /// Emit shaped values and errors as JSON lines instead of plain text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay recorded samples through the configured axis mappings
    Run {
        /// CSV file with strict headers 'axis,sample'; omit to read stdin
        /// (lines of 'axis,sample' or a bare sample for the first axis)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Print per-axis sample counts on completion
        #[arg(long, action = ArgAction::SetTrue)]
        summary: bool,
    },
    /// Parse and validate the config, then exit
    Check,
}
