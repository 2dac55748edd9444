//! Import type resolution
//!
//! Mappings store their import type as the label a user picked. The label is
//! resolved once per trigger into a closed [`ImportKind`].

use crate::domain::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation an import job performs for each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportKind {
    /// Create a new record per row
    Insert,
    /// Update the record named by the identifier column
    Update,
    /// Update when the identifier matches, create otherwise
    Upsert,
}

impl ImportKind {
    /// Resolve a user-facing label
    ///
    /// Labels are matched exactly: `"Insert"`, `"Update"`, `"Upsert"`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidArgument`] for any other label,
    /// including the empty string and other casings.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetsync::core::import::ImportKind;
    ///
    /// assert_eq!(ImportKind::resolve("Upsert").unwrap(), ImportKind::Upsert);
    /// assert!(ImportKind::resolve("upsert").is_err());
    /// ```
    pub fn resolve(label: &str) -> Result<Self> {
        match label {
            "Insert" => Ok(ImportKind::Insert),
            "Update" => Ok(ImportKind::Update),
            "Upsert" => Ok(ImportKind::Upsert),
            other => Err(SyncError::InvalidArgument(format!(
                "Unknown import type '{other}'. Must be one of: Insert, Update, Upsert"
            ))),
        }
    }

    /// Label of the kind, the inverse of [`ImportKind::resolve`]
    pub fn label(&self) -> &'static str {
        match self {
            ImportKind::Insert => "Insert",
            ImportKind::Update => "Update",
            ImportKind::Upsert => "Upsert",
        }
    }

    /// Whether rows must carry an identifier column
    pub fn requires_id_field(&self) -> bool {
        matches!(self, ImportKind::Update | ImportKind::Upsert)
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ImportKind {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}
