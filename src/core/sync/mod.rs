//! Sync runs over configured mappings
//!
//! - [`coordinator`] - wiring, filtering, concurrency and shutdown
//! - [`summary`] - per-mapping reports and run totals

pub mod coordinator;
pub mod summary;

pub use coordinator::{MappingState, SyncCoordinator, SyncFilter};
pub use summary::{MappingReport, MappingStatus, SyncErrorType, SyncSummary};
