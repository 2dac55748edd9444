//! Core business logic for Sheetsync.
//!
//! # Modules
//!
//! - [`extract`] - Row-delta extraction from full worksheet contents
//! - [`payload`] - CSV payload encoding and file naming
//! - [`import`] - Import type resolution, job dispatch and the import controller
//! - [`state`] - Worksheet mappings and their checkpoints
//! - [`sync`] - Runs over all configured mappings
//!
//! # Import Workflow
//!
//! For each worksheet mapping:
//!
//! 1. **Check**: record type set, import type known, previous import not failed
//! 2. **Fetch**: read all worksheet values
//! 3. **Extract**: skip the rows the counter says were already imported
//! 4. **Encode**: header plus new rows as CSV
//! 5. **Dispatch**: store the payload, create and enqueue an import job
//! 6. **Checkpoint**: advance the counter and record the job
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetsync::config::load_config;
//! use sheetsync::core::sync::{SyncCoordinator, SyncFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sheetsync.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = SyncCoordinator::new(config, shutdown_rx).await?;
//!
//! let summary = coordinator.run_once(&SyncFilter::default()).await?;
//! println!("Dispatched: {}", summary.dispatched());
//! println!("Failed: {}", summary.failed());
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod import;
pub mod payload;
pub mod state;
pub mod sync;
