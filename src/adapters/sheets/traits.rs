//! Spreadsheet service trait definition
//!
//! Abstracts the remote spreadsheet service so the import engine can be run
//! against Google Sheets or an in-memory fake.

use crate::domain::ids::WorksheetId;
use crate::domain::{Result, Row};
use async_trait::async_trait;

/// Read access to remote worksheets
///
/// Implementations own transport concerns (timeouts, retries); the engine
/// propagates whatever error they return.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Every row of a worksheet, header first
    ///
    /// Rows are padded to equal length. An empty worksheet yields no rows.
    async fn get_all_values(&self, spreadsheet_url: &str, worksheet_id: WorksheetId)
        -> Result<Vec<Row>>;

    /// First row of a worksheet
    ///
    /// Empty when the worksheet is empty.
    async fn get_header_row(&self, spreadsheet_url: &str, worksheet_id: WorksheetId)
        -> Result<Row>;
}
