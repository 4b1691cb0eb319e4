//! `projledger` command-line entry point.
//!
//! # Responsibility
//! - Load portfolio snapshots from JSON and print engine reports.
//! - Run the one-time legacy assignment migration.

mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Command};
use log::{info, warn};
use projledger_core::{
    default_log_level, init_logging_with, reconcile_legacy_snapshot, LegacySnapshot,
    LoggingConfig, PortfolioSnapshot,
};
use report::PortfolioReport;
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    match args.command {
        Command::Ping => {
            println!("projledger_core ping={}", projledger_core::ping());
            println!("projledger_core version={}", projledger_core::core_version());
            Ok(())
        }
        Command::Report { snapshot, json } => {
            let snapshot = match snapshot {
                Some(path) => load_json::<PortfolioSnapshot>(&path)?,
                None => PortfolioSnapshot::demo(),
            };
            info!(
                "event=report_start module=cli status=ok projects={} contractors={}",
                snapshot.projects.len(),
                snapshot.contractors.len()
            );
            let report = PortfolioReport::build(&snapshot);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
            Ok(())
        }
        Command::Reconcile { input, output } => {
            let legacy = load_json::<LegacySnapshot>(&input)?;
            let (snapshot, report) = reconcile_legacy_snapshot(&legacy);
            let migrated = serde_json::to_string_pretty(&snapshot)?;
            match output {
                Some(path) => std::fs::write(&path, migrated)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{migrated}"),
            }

            eprintln!(
                "reconciled {} assignments, {} findings, amount at risk {}",
                report.assignments_seen,
                report.findings.len(),
                report.amount_at_risk()
            );
            if !report.is_lossless() {
                warn!("event=reconcile_lossy module=cli status=degraded");
                eprintln!("{}", serde_json::to_string_pretty(&report.findings)?);
            }
            Ok(())
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(log_dir) = args.log_dir.as_deref() else {
        return Ok(());
    };
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    let config = LoggingConfig::new(level, log_dir)?.with_echo_warnings(true);
    init_logging_with(config)?;
    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
