//! Payload file storage
//!
//! Generated CSV payloads are stored as files that import jobs reference.

pub mod local;

use crate::domain::import_job::PayloadRef;
use crate::domain::Result;
use async_trait::async_trait;

pub use local::LocalPayloadStore;

/// Storage for generated import payloads
#[async_trait]
pub trait PayloadStore: Send + Sync {
    /// Persist a payload under the given file name
    ///
    /// # Returns
    ///
    /// A reference the job executor can use to retrieve the payload.
    async fn store_payload(&self, file_name: &str, content: &str) -> Result<PayloadRef>;
}
