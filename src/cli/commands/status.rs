//! Status command implementation
//!
//! Shows every configured mapping with its stored checkpoint and the status
//! of its last import job.

use super::exit_code_for;
use crate::config::load_config;
use crate::core::sync::{MappingState, SyncCoordinator, SyncFilter};
use crate::domain::JobStatus;
use clap::Args;
use serde::Serialize;
use tokio::sync::watch;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show mappings of this spreadsheet
    #[arg(long)]
    pub spreadsheet: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One status line
#[derive(Debug, Serialize)]
struct StatusEntry {
    spreadsheet: String,
    mapping: String,
    record_type: String,
    import_type: String,
    counter: u64,
    last_import: Option<String>,
    last_status: Option<JobStatus>,
    blocked: bool,
    last_synced_at: Option<String>,
}

impl From<&MappingState> for StatusEntry {
    fn from(state: &MappingState) -> Self {
        let mapping = &state.mapping;
        Self {
            spreadsheet: state.parent.id.to_string(),
            mapping: mapping.name.to_string(),
            record_type: mapping.mapped_record_type.clone(),
            import_type: mapping.import_type.clone(),
            counter: mapping.counter,
            last_import: mapping.last_import.map(|id| id.to_string()),
            last_status: state.last_status,
            blocked: state
                .last_status
                .is_some_and(|status| status.blocks_next_import()),
            last_synced_at: mapping
                .last_synced_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking import status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let coordinator = match SyncCoordinator::new(config, shutdown_rx).await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to connect to database");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let filter = SyncFilter {
            spreadsheet: self.spreadsheet.clone(),
            mapping: None,
        };

        let states = match coordinator.status(&filter).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to load mapping state");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let entries: Vec<StatusEntry> = states.iter().map(StatusEntry::from).collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(0);
        }

        println!("📊 Import Status");
        println!();

        if entries.is_empty() {
            println!("No mappings configured.");
            return Ok(0);
        }

        println!(
            "{:<20} {:<30} {:<20} {:<8} {:<10} {:<20}",
            "Spreadsheet", "Mapping", "Record Type", "Rows", "Status", "Last Sync"
        );
        println!("{}", "-".repeat(113));

        for entry in &entries {
            let status = match entry.last_status {
                Some(JobStatus::Error) => "❌ Error".to_string(),
                Some(status) => status.to_string(),
                None if entry.last_import.is_some() => "Unknown".to_string(),
                None => "Never".to_string(),
            };

            println!(
                "{:<20} {:<30} {:<20} {:<8} {:<10} {:<20}",
                entry.spreadsheet,
                entry.mapping,
                entry.record_type,
                entry.counter,
                status,
                entry.last_synced_at.as_deref().unwrap_or("Never")
            );
        }

        let blocked = entries.iter().filter(|e| e.blocked).count();
        if blocked > 0 {
            println!();
            println!("⚠️  {blocked} mapping(s) blocked by a failed import.");
            println!("   Fix the import, then run 'sheetsync clear --mapping <name>'.");
        }

        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::mapping::WorksheetMappingBuilder;
    use crate::domain::{JobId, MappingId, SpreadsheetId, SpreadsheetRef, WorksheetId};

    fn state(last_status: Option<JobStatus>) -> MappingState {
        let parent = SpreadsheetId::new("orders").unwrap();
        let mut mapping = WorksheetMappingBuilder::new(
            MappingId::new("orders-0").unwrap(),
            parent.clone(),
            WorksheetId::new(0),
        )
        .mapped_record_type("Sales Order")
        .counter(7)
        .build();
        mapping.last_import = Some(JobId::generate());

        MappingState {
            parent: SpreadsheetRef::new(parent, "Orders", "https://example.com/d/abc"),
            mapping,
            last_status,
        }
    }

    #[test]
    fn test_status_entry_blocked() {
        let entry = StatusEntry::from(&state(Some(JobStatus::Error)));
        assert!(entry.blocked);
        assert_eq!(entry.counter, 7);
        assert_eq!(entry.mapping, "orders-0");
    }

    #[test]
    fn test_status_entry_json() {
        let entry = StatusEntry::from(&state(Some(JobStatus::PartialSuccess)));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["last_status"], "Partial Success");
        assert_eq!(json["blocked"], false);
    }
}
