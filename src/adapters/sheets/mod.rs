//! Spreadsheet service adapters
//!
//! Provides read access to remote worksheets.

pub mod client;
pub mod models;
pub mod traits;

pub use client::{spreadsheet_key, GoogleSheetsClient};
pub use traits::SpreadsheetService;
