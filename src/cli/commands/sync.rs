//! Sync command implementation
//!
//! Imports new worksheet rows for every configured mapping, once or on an
//! interval.

use super::exit_code_for;
use crate::config::load_config;
use crate::core::sync::{MappingStatus, SyncCoordinator, SyncErrorType, SyncFilter, SyncSummary};
use clap::Args;
use std::time::Duration;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Only sync mappings of this spreadsheet (configuration id)
    #[arg(long)]
    pub spreadsheet: Option<String>,

    /// Only sync this mapping
    #[arg(long)]
    pub mapping: Option<String>,

    /// Compute deltas without dispatching jobs or saving state
    #[arg(long)]
    pub dry_run: bool,

    /// Keep running, syncing on an interval until interrupted
    #[arg(long)]
    pub watch: bool,

    /// Seconds between runs in watch mode (overrides sync.watch_interval_seconds)
    #[arg(long, requires = "watch")]
    pub interval: Option<u64>,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No jobs will be dispatched and no state saved");
            println!();
        }

        let interval = Duration::from_secs(
            self.interval
                .unwrap_or(config.sync.watch_interval_seconds)
                .max(1),
        );

        let coordinator = match SyncCoordinator::new(config, shutdown_signal).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create sync coordinator");
                eprintln!("❌ Failed to initialize sync: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let filter = SyncFilter {
            spreadsheet: self.spreadsheet.clone(),
            mapping: self.mapping.clone(),
        };

        println!("🚀 Starting sync...");
        println!();

        let result = if self.watch {
            coordinator.run_watch(&filter, interval).await
        } else {
            coordinator.run_once(&filter).await
        };

        let summary = match result {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Sync failed");
                eprintln!("❌ Sync failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        print_summary(&summary);
        Ok(exit_code(&summary))
    }
}

fn print_summary(summary: &SyncSummary) {
    for report in &summary.reports {
        let line = match &report.status {
            MappingStatus::Dispatched { job_id, rows } => {
                format!("✅ {} rows dispatched as job {job_id}", rows)
            }
            MappingStatus::UpToDate => "✅ up to date".to_string(),
            MappingStatus::DryRun { rows, row_start } => {
                format!("🔍 would dispatch {rows} rows starting at row {row_start}")
            }
            MappingStatus::Failed {
                error_type,
                message,
            } => format!("❌ {error_type:?}: {message}"),
            MappingStatus::Skipped => "⚠️  skipped (shutdown)".to_string(),
        };
        println!("  {}/{}: {line}", report.spreadsheet, report.mapping);
    }

    println!();
    println!("📊 Sync Summary:");
    if summary.runs > 1 {
        println!("  Runs: {}", summary.runs);
    }
    println!("  Mappings: {}", summary.mappings_total());
    println!("  Jobs Dispatched: {}", summary.dispatched());
    println!("  Rows Dispatched: {}", summary.rows_dispatched());
    println!("  Up To Date: {}", summary.up_to_date());
    if summary.dry_run() > 0 {
        println!("  Dry Run: {}", summary.dry_run());
    }
    println!("  Failed: {}", summary.failed());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
}

/// Exit code for a finished run
fn exit_code(summary: &SyncSummary) -> i32 {
    if summary.interrupted {
        println!("⚠️  Sync interrupted. Completed mappings are checkpointed.");
        130
    } else if summary.is_successful() {
        println!("✅ Sync completed successfully!");
        0
    } else if summary.failed_with(SyncErrorType::Connection) == summary.mappings_total() {
        println!("❌ Spreadsheet service unreachable");
        4
    } else {
        println!("⚠️  Sync completed with failures");
        1
    }
}
