//! Clear command implementation
//!
//! Forgets the last import job of a mapping so a mapping blocked by a
//! failed import can import again. The row counter is kept.

use crate::adapters::database::create_record_backend;
use crate::config::load_config;
use crate::core::state::StateManager;
use crate::domain::MappingId;
use clap::Args;

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Mapping to release
    #[arg(long)]
    pub mapping: String,
}

impl ClearArgs {
    /// Execute the clear command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(mapping = %self.mapping, "Clearing last import");

        let name = match MappingId::new(&self.mapping) {
            Ok(n) => n,
            Err(e) => {
                println!("❌ Invalid mapping name: {e}");
                return Ok(2);
            }
        };

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let backend = match create_record_backend(&config) {
            Ok(b) => b,
            Err(e) => {
                println!("❌ Failed to create record store client");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        let state_manager = StateManager::new_with_storage(backend.mappings);

        match state_manager.clear_last_import(&name).await {
            Ok(true) => {
                println!("✅ Cleared last import of mapping {name}");
                Ok(0)
            }
            Ok(false) => {
                println!("⚠️  Mapping {name} has no stored state");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to clear last import");
                println!("   Error: {e}");
                Ok(4)
            }
        }
    }
}
