//! Domain identifier types with validation
//!
//! Newtype wrappers keep spreadsheet ids, mapping names, remote worksheet
//! handles and job ids from being mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Spreadsheet configuration identifier
///
/// Identifies a parent spreadsheet configuration (the `[[spreadsheets]]`
/// entry), not the remote document key.
///
/// # Examples
///
/// ```
/// use sheetsync::domain::ids::SpreadsheetId;
/// use std::str::FromStr;
///
/// let id = SpreadsheetId::from_str("orders").unwrap();
/// assert_eq!(id.as_str(), "orders");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    /// Creates a new SpreadsheetId
    ///
    /// Returns `Err` if the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Spreadsheet ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpreadsheetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SpreadsheetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Worksheet mapping identifier
///
/// The mapping's own stable name. Import jobs carry it in their
/// `worksheet_id` field so a job can be traced to the binding that produced it.
///
/// # Examples
///
/// ```
/// use sheetsync::domain::ids::MappingId;
///
/// let id = MappingId::new("orders-0").unwrap();
/// assert_eq!(id.to_string(), "orders-0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingId(String);

impl MappingId {
    /// Creates a new MappingId
    ///
    /// Returns `Err` if the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Mapping ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Derives the default mapping name for a worksheet of a spreadsheet
    ///
    /// Format: `"{spreadsheet_id}-{worksheet_id}"`
    pub fn for_worksheet(spreadsheet_id: &SpreadsheetId, worksheet_id: WorksheetId) -> Self {
        Self(format!("{}-{}", spreadsheet_id.as_str(), worksheet_id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MappingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MappingId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for MappingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remote worksheet handle
///
/// The integer `sheetId` (the `gid` in a sheet URL) that stays stable when a
/// worksheet is renamed or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorksheetId(u64);

impl WorksheetId {
    /// Creates a new WorksheetId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw handle
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorksheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorksheetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid worksheet ID '{s}': {e}"))
    }
}

impl From<u64> for WorksheetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Import job identifier
///
/// Issued by the record store when a job record is created.
///
/// # Examples
///
/// ```
/// use sheetsync::domain::ids::JobId;
/// use std::str::FromStr;
///
/// let id = JobId::from_str("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
/// assert_eq!(id.to_string(), "0f8fad5b-d9cb-469f-a165-70867728950e");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generates a fresh random job id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid job ID '{s}': {e}"))
    }
}
