//! External system integrations for Sheetsync.
//!
//! - [`sheets`] - Spreadsheet service (Google Sheets v4 REST API)
//! - [`database`] - Record store, job queue and mapping store traits
//! - [`postgresql`] - PostgreSQL implementation of the record store traits
//! - [`files`] - Payload storage
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind async traits, so the import
//! engine can be driven by in-memory implementations in tests.
//!
//! ```rust,no_run
//! use sheetsync::adapters::sheets::{GoogleSheetsClient, SpreadsheetService};
//! use sheetsync::config::SheetsConfig;
//! use sheetsync::domain::WorksheetId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GoogleSheetsClient::new(SheetsConfig::default())?;
//! let rows = client
//!     .get_all_values(
//!         "https://docs.google.com/spreadsheets/d/abc123/edit",
//!         WorksheetId::new(0),
//!     )
//!     .await?;
//! println!("{} rows", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod files;
pub mod postgresql;
pub mod sheets;
