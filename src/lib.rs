// Sheetsync - Spreadsheet to record store incremental import
// Copyright (c) 2025 Sheetsync Contributors
// Licensed under the MIT License

//! # Sheetsync - Incremental Spreadsheet Import
//!
//! Sheetsync watches worksheets of remote spreadsheets and turns the rows
//! appended since the last run into import jobs for a record store.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** the data rows a worksheet gained since its last import
//! - **Encoding** them, with the header row, as a CSV payload
//! - **Dispatching** import jobs (`Insert`, `Update` or `Upsert`) to a job queue
//! - **Checkpointing** a per-worksheet row counter so every row is sent once
//! - **Guarding** against importing on top of a failed import
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Import engine (extract, payload, import, state, sync)
//! - [`adapters`] - External integrations (spreadsheet service, PostgreSQL, payload files)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheetsync::config::load_config;
//! use sheetsync::core::sync::{SyncCoordinator, SyncFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("sheetsync.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = SyncCoordinator::new(config, shutdown_rx).await?;
//!
//!     let summary = coordinator.run_once(&SyncFilter::default()).await?;
//!     println!("Dispatched {} rows", summary.rows_dispatched());
//!     Ok(())
//! }
//! ```
//!
//! ## Incremental Import
//!
//! Each worksheet mapping stores how many data rows were already imported.
//! The next run only sends what lies beyond that counter:
//!
//! ```rust
//! use sheetsync::core::extract::extract_delta;
//!
//! let rows = vec![
//!     vec!["Name".to_string(), "Qty".to_string()],
//!     vec!["apples".to_string(), "3".to_string()],
//!     vec!["pears".to_string(), "5".to_string()],
//! ];
//!
//! let delta = extract_delta(rows, 1, false);
//! assert_eq!(delta.len(), 1);
//! assert_eq!(delta.rows[0][0], "pears");
//! ```
//!
//! ## Error Handling
//!
//! Sheetsync uses the [`domain::SyncError`] type for all errors:
//!
//! ```rust,no_run
//! use sheetsync::domain::SyncError;
//!
//! fn example() -> Result<(), SyncError> {
//!     let config = sheetsync::config::load_config("sheetsync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
