//! Record store abstraction traits
//!
//! The import engine talks to three collaborators on the storage side:
//! the job store ([`RecordStore`]), the queue that executes jobs
//! ([`JobQueue`]) and the mapping checkpoint store ([`MappingStore`]).
//! A single backend may implement all three.

use crate::core::state::mapping::WorksheetMapping;
use crate::domain::ids::{JobId, MappingId};
use crate::domain::import_job::{JobStatus, NewImportJob};
use crate::domain::Result;
use async_trait::async_trait;

/// Import job store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Test the connection to the store
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    /// Create tables or containers the store needs, if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    /// Create a new import job record
    ///
    /// One record per call; existing jobs are never modified.
    ///
    /// # Returns
    ///
    /// The id of the created job.
    async fn create_import_job(&self, job: &NewImportJob) -> Result<JobId>;

    /// Current status of a job
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the store does not know the job.
    async fn job_status(&self, job_id: &JobId) -> Result<Option<JobStatus>>;
}

/// Asynchronous job execution
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Hand a job over for deferred execution
    ///
    /// Returns once the queue has acknowledged the job. Execution happens
    /// later and is never awaited.
    async fn enqueue(&self, job_id: &JobId) -> Result<()>;
}

/// Persistence of mapping checkpoints
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Load a mapping by name
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(WorksheetMapping))` if found, `Ok(None)` if not found.
    async fn load_mapping(&self, name: &MappingId) -> Result<Option<WorksheetMapping>>;

    /// Create or replace a mapping
    async fn save_mapping(&self, mapping: &WorksheetMapping) -> Result<()>;

    /// Drop the last-import reference of a mapping
    ///
    /// This is the operator action that releases a mapping blocked by a
    /// failed import.
    ///
    /// # Returns
    ///
    /// `Ok(false)` when the mapping does not exist.
    async fn clear_last_import(&self, name: &MappingId) -> Result<bool>;
}
