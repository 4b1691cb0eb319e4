//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Project portfolio cost and profit reports", long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Log level: trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, global = true, env = "PROJLEDGER_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "PROJLEDGER_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print core linkage check and version
    Ping,
    /// Print project costs, portfolio totals and rankings
    Report {
        /// Snapshot JSON file; the built-in demo dataset is used when omitted
        #[arg(short, long, value_name = "FILE")]
        snapshot: Option<PathBuf>,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Migrate a legacy snapshot with stored assignment totals to hours
    Reconcile {
        /// Legacy snapshot JSON file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Where to write the migrated snapshot; stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
