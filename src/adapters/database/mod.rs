//! Record store abstraction layer
//!
//! This module provides a trait-based abstraction over the store that holds
//! import jobs and mapping checkpoints, and the queue that executes jobs.

pub mod factory;
pub mod traits;

pub use factory::{create_record_backend, RecordBackend};
pub use traits::{JobQueue, MappingStore, RecordStore};
