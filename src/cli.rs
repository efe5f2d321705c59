//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal host for the "rate this app" prompt.
#[derive(Debug, Parser)]
#[command(name = "apprate", version, about)]
pub struct Cli {
    /// TOML file with [dialog], [strings] and [colors] tables
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding persisted usage counters and logs
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. "info" or "apprate=debug" (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Record a launch and show the dialog if it is due (default)
    Launch,
    /// Show the dialog regardless of the usage counters
    Show,
    /// Print the usage counters and each eligibility gate
    Status,
    /// Clear all usage counters and flags
    Reset,
    /// Allow prompting again after "never ask again"
    Enable,
}

impl Cli {
    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Launch)
    }
}
