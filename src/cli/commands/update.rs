//! Update command implementation
//!
//! Re-sends every data row of one mapping as an `Update` import job.

use super::exit_code_for;
use crate::config::load_config;
use crate::core::import::ImportOutcome;
use crate::core::sync::SyncCoordinator;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Mapping to re-send
    #[arg(long)]
    pub mapping: String,

    /// Show what would be sent without dispatching a job
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateArgs {
    /// Execute the update command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(mapping = %self.mapping, "Starting update import");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        if self.dry_run {
            config.application.dry_run = true;
        }

        let coordinator = match SyncCoordinator::new(config, shutdown_signal).await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to initialize sync: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("🔄 Updating records from mapping {}", self.mapping);
        println!();

        match coordinator.run_update(&self.mapping).await {
            Ok(ImportOutcome::Dispatched { job_id, rows }) => {
                println!("✅ {rows} rows dispatched as update job {job_id}");
                Ok(0)
            }
            Ok(ImportOutcome::DryRun { rows, .. }) => {
                println!("🔍 DRY RUN: would dispatch {rows} rows as an update job");
                Ok(0)
            }
            Ok(ImportOutcome::NothingToImport) => {
                println!("✅ Worksheet has no data rows; nothing to update");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(mapping = %self.mapping, error = %e, "Update import failed");
                eprintln!("❌ Update failed: {e}");
                Ok(match exit_code_for(&e) {
                    // blocked or invalid mapping
                    5 => 1,
                    code => code,
                })
            }
        }
    }
}
