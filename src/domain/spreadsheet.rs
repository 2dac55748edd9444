//! Parent spreadsheet view
//!
//! A worksheet mapping only stores its parent's id. Whatever runs the import
//! resolves the parent and hands this read-only view to the controller.

use crate::domain::ids::SpreadsheetId;
use serde::{Deserialize, Serialize};

/// One worksheet row: cell values in column order
pub type Row = Vec<String>;

/// Read-only view of a parent spreadsheet configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetRef {
    /// Configuration id, copied into every import job as `spreadsheet_id`
    pub id: SpreadsheetId,

    /// Human readable name, used as the payload file name prefix
    pub display_name: String,

    /// Remote spreadsheet URL handed to the spreadsheet service
    pub url: String,
}

impl SpreadsheetRef {
    /// Create a new parent view
    pub fn new(id: SpreadsheetId, display_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            url: url.into(),
        }
    }
}
