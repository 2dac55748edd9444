//! Validate config command implementation
//!
//! Loads the configuration file and prints what it resolves to, without
//! contacting any service.

use crate::adapters::postgresql::redact_connection_string;
use crate::config::{load_config, SyncConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_summary(&config);

        // Mapping-level problems that only surface at import time
        let mut warnings = 0;
        for spreadsheet in &config.spreadsheets {
            let mappings = match spreadsheet.mappings() {
                Ok(m) => m,
                Err(e) => {
                    println!("❌ Spreadsheet {}: {e}", spreadsheet.id);
                    return Ok(2);
                }
            };
            for mapping in mappings {
                if crate::core::import::ImportKind::resolve(&mapping.import_type).is_err() {
                    println!(
                        "⚠️  Mapping {}: unknown import type '{}'",
                        mapping.name, mapping.import_type
                    );
                    warnings += 1;
                }
            }
        }

        if warnings > 0 {
            println!();
            println!("⚠️  {warnings} mapping(s) will fail at import time");
        }

        Ok(0)
    }
}

fn print_summary(config: &SyncConfig) {
    use secrecy::ExposeSecret;

    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  Sheets API: {}", config.sheets.base_url);
    println!(
        "  Access Token: {}",
        if config.sheets.access_token.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!(
        "  PostgreSQL: {}",
        redact_connection_string(config.postgresql.connection_string.expose_secret().as_ref())
    );
    println!("  Payload Directory: {}", config.storage.payload_dir);
    println!("  Parallel Mappings: {}", config.sync.parallel_mappings);
    println!("  Watch Interval: {}s", config.sync.watch_interval_seconds);
    println!();

    for spreadsheet in &config.spreadsheets {
        println!(
            "  📄 {} ({}): {} worksheet(s)",
            spreadsheet.name,
            spreadsheet.id,
            spreadsheet.worksheets.len()
        );
        for worksheet in &spreadsheet.worksheets {
            println!(
                "     - gid {} → {} [{}]",
                worksheet.worksheet_id, worksheet.mapped_record_type, worksheet.import_type
            );
        }
    }
    println!();
}
