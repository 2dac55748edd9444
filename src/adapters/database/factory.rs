//! Record store factory
//!
//! This module builds the record store collaborators from configuration.

use crate::adapters::database::traits::{JobQueue, MappingStore, RecordStore};
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::SyncConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Record store collaborators sharing one backend
pub struct RecordBackend {
    /// Import job store
    pub records: Arc<dyn RecordStore + Send + Sync>,

    /// Job queue
    pub queue: Arc<dyn JobQueue + Send + Sync>,

    /// Mapping checkpoint store
    pub mappings: Arc<dyn MappingStore + Send + Sync>,
}

/// Create the record store collaborators
///
/// A single PostgreSQL adapter backs all three traits, so they share one
/// connection pool.
///
/// # Errors
///
/// Returns an error if the client cannot be created
pub fn create_record_backend(config: &SyncConfig) -> Result<RecordBackend> {
    tracing::info!("Creating PostgreSQL record store client");

    let client = PostgreSQLClient::new(config.postgresql.clone())?;
    let adapter = Arc::new(PostgreSQLAdapter::new(client));

    Ok(RecordBackend {
        records: adapter.clone() as Arc<dyn RecordStore + Send + Sync>,
        queue: adapter.clone() as Arc<dyn JobQueue + Send + Sync>,
        mappings: adapter as Arc<dyn MappingStore + Send + Sync>,
    })
}
