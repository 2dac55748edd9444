//! Domain error types
//!
//! This module defines the error hierarchy for Sheetsync. Errors raised by
//! collaborators (spreadsheet service, record store) keep their own variants
//! so callers can tell a blocked import apart from a flaky network.

use thiserror::Error;

/// Main Sheetsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps collaborator-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A caller supplied a value outside the accepted set (e.g. an unknown import type label)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A precondition on a mapping does not hold (missing record type,
    /// missing identifier column, blocked by a failed import)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Spreadsheet service errors
    #[error("Spreadsheet service error: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    /// Record store and job queue errors
    #[error("Record store error: {0}")]
    RecordStore(#[from] RecordStoreError),

    /// Payload storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl SyncError {
    /// Whether the error comes from a collaborator rather than from the mapping itself
    ///
    /// Collaborator failures are transient from the engine's point of view: the
    /// mapping is untouched and the next run will try again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SyncError::Spreadsheet(_)
                | SyncError::RecordStore(_)
                | SyncError::Storage(_)
                | SyncError::Io(_)
        )
    }
}

/// Spreadsheet service errors
///
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The spreadsheet URL does not carry a recognizable spreadsheet key
    #[error("Invalid spreadsheet URL: {0}")]
    InvalidUrl(String),

    /// Failed to reach the spreadsheet service
    #[error("Failed to connect to spreadsheet service: {0}")]
    ConnectionFailed(String),

    /// No worksheet with the requested id exists in the spreadsheet
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// Response could not be decoded
    #[error("Invalid response from spreadsheet service: {0}")]
    InvalidResponse(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Record store errors
///
/// Raised by the job store, the mapping store and the job queue.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to record store: {0}")]
    ConnectionFailed(String),

    /// A query or statement failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value could not be mapped back to a domain value
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Mapping not found
    #[error("Worksheet mapping not found: {0}")]
    MappingNotFound(String),

    /// The job could not be handed to the queue
    #[error("Failed to enqueue import job: {0}")]
    EnqueueFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for SyncError {
    fn from(err: csv::Error) -> Self {
        SyncError::Serialization(format!("CSV error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
