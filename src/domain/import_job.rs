//! Import job model
//!
//! Import jobs are created by the dispatcher and executed elsewhere. The
//! engine only ever creates them and reads back their status.

use crate::core::import::ImportKind;
use crate::domain::ids::{MappingId, SpreadsheetId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference to a stored payload blob
///
/// Opaque to the engine; the payload store decides what it contains
/// (a file path for the local store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadRef(String);

impl PayloadRef {
    /// Wrap a store-specific reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PayloadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Import job creation request
///
/// Field names follow what the job executor expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewImportJob {
    /// Target record type
    pub reference_type: String,

    /// Operation the executor performs per row
    pub import_type: ImportKind,

    /// Stored CSV payload
    pub import_file: PayloadRef,

    /// Suppress notifications while importing
    pub mute_notifications: bool,

    /// Submit records once imported
    pub submit_after_import: bool,

    /// Parent spreadsheet configuration id
    pub spreadsheet_id: SpreadsheetId,

    /// Name of the mapping that produced the job (not the remote worksheet handle)
    pub worksheet_id: MappingId,

    /// First data row (0-based, header excluded) carried by the payload
    pub row_start: u64,

    /// One past the last data row carried by the payload
    pub row_end: u64,
}

/// Import job status as reported by the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Queued or running
    Pending,
    /// All rows imported
    Success,
    /// Some rows imported
    #[serde(rename = "Partial Success")]
    PartialSuccess,
    /// Import failed; blocks further imports of the mapping
    Error,
    /// Executor gave up waiting
    #[serde(rename = "Timed Out")]
    TimedOut,
}

impl JobStatus {
    /// Stored label of the status
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Success => "Success",
            JobStatus::PartialSuccess => "Partial Success",
            JobStatus::Error => "Error",
            JobStatus::TimedOut => "Timed Out",
        }
    }

    /// Whether a mapping whose last import has this status may not import again
    pub fn blocks_next_import(&self) -> bool {
        matches!(self, JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(JobStatus::Pending),
            "Success" => Ok(JobStatus::Success),
            "Partial Success" => Ok(JobStatus::PartialSuccess),
            "Error" => Ok(JobStatus::Error),
            "Timed Out" => Ok(JobStatus::TimedOut),
            other => Err(format!("Unknown import job status '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_error_blocks() {
        assert!(JobStatus::Error.blocks_next_import());
        assert!(!JobStatus::Pending.blocks_next_import());
        assert!(!JobStatus::Success.blocks_next_import());
        assert!(!JobStatus::PartialSuccess.blocks_next_import());
        assert!(!JobStatus::TimedOut.blocks_next_import());
    }

    #[test]
    fn test_status_labels_parse_back() {
        for status in [
            JobStatus::Pending,
            JobStatus::Success,
            JobStatus::PartialSuccess,
            JobStatus::Error,
            JobStatus::TimedOut,
        ] {
            assert_eq!(JobStatus::from_str(status.label()).unwrap(), status);
        }
        assert!(JobStatus::from_str("error").is_err());
    }

    #[test]
    fn test_status_serde_uses_labels() {
        let json = serde_json::to_string(&JobStatus::PartialSuccess).unwrap();
        assert_eq!(json, "\"Partial Success\"");
    }
}
