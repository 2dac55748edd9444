//! Domain models and types for Sheetsync.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SpreadsheetId`], [`MappingId`], [`WorksheetId`], [`JobId`])
//! - **Import job model** ([`NewImportJob`], [`JobStatus`], [`PayloadRef`])
//! - **Parent spreadsheet view** ([`SpreadsheetRef`])
//! - **Error types** ([`SyncError`], [`SpreadsheetError`], [`RecordStoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! A mapping name and a remote worksheet handle both end up in an import job,
//! in different fields. Separate newtypes keep them apart:
//!
//! ```rust
//! use sheetsync::domain::{MappingId, SpreadsheetId, WorksheetId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let parent = SpreadsheetId::new("orders")?;
//! let remote = WorksheetId::new(42);
//! let mapping = MappingId::for_worksheet(&parent, remote);
//!
//! // let wrong: WorksheetId = mapping;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod import_job;
pub mod result;
pub mod spreadsheet;

// Re-export commonly used types for convenience
pub use errors::{RecordStoreError, SpreadsheetError, SyncError};
pub use ids::{JobId, MappingId, SpreadsheetId, WorksheetId};
pub use import_job::{JobStatus, NewImportJob, PayloadRef};
pub use result::Result;
pub use spreadsheet::{Row, SpreadsheetRef};
