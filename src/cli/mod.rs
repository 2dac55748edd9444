//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Sheetsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Sheetsync - incremental spreadsheet import
#[derive(Parser, Debug)]
#[command(name = "sheetsync")]
#[command(version, about, long_about = None)]
#[command(author = "Sheetsync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sheetsync.toml", env = "SHEETSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHEETSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import new worksheet rows for the configured mappings
    Sync(commands::sync::SyncArgs),

    /// Re-send every row of one mapping as an update import
    Update(commands::update::UpdateArgs),

    /// Show mapping checkpoints and last import status
    Status(commands::status::StatusArgs),

    /// Release a mapping blocked by a failed import
    Clear(commands::clear::ClearArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
