//! Import job dispatch
//!
//! Turns an encoded payload into a queued import job: store the payload,
//! create the job record, hand it to the queue.

use super::ImportKind;
use crate::adapters::database::traits::{JobQueue, RecordStore};
use crate::adapters::files::PayloadStore;
use crate::core::payload::{payload_file_name, random_suffix};
use crate::core::state::mapping::WorksheetMapping;
use crate::domain::ids::JobId;
use crate::domain::import_job::NewImportJob;
use crate::domain::{Result, SpreadsheetRef};
use std::sync::Arc;

/// One job to dispatch
#[derive(Debug)]
pub struct DispatchRequest<'a> {
    /// Parent spreadsheet (id and display name end up in the job)
    pub parent: &'a SpreadsheetRef,

    /// Mapping the rows came from; supplies target type and flags
    pub mapping: &'a WorksheetMapping,

    /// Resolved import kind
    pub kind: ImportKind,

    /// Encoded CSV payload
    pub payload: String,

    /// First data row carried by the payload
    pub row_start: u64,

    /// One past the last data row carried by the payload
    pub row_end: u64,
}

/// Creates and enqueues import jobs
pub struct ImportDispatcher {
    payloads: Arc<dyn PayloadStore + Send + Sync>,
    records: Arc<dyn RecordStore + Send + Sync>,
    queue: Arc<dyn JobQueue + Send + Sync>,
}

impl ImportDispatcher {
    /// Create a dispatcher over its three collaborators
    pub fn new(
        payloads: Arc<dyn PayloadStore + Send + Sync>,
        records: Arc<dyn RecordStore + Send + Sync>,
        queue: Arc<dyn JobQueue + Send + Sync>,
    ) -> Self {
        Self {
            payloads,
            records,
            queue,
        }
    }

    /// Dispatch one import job
    ///
    /// Every call creates a new job; earlier jobs are never touched. Returns
    /// once the queue has acknowledged the job, execution is not awaited.
    ///
    /// # Errors
    ///
    /// Propagates the first failing collaborator's error. A payload stored
    /// before a later step failed is left in place.
    pub async fn dispatch(&self, request: DispatchRequest<'_>) -> Result<JobId> {
        let DispatchRequest {
            parent,
            mapping,
            kind,
            payload,
            row_start,
            row_end,
        } = request;

        let file_name =
            payload_file_name(&parent.display_name, mapping.worksheet_id, &random_suffix());
        let import_file = self.payloads.store_payload(&file_name, &payload).await?;

        let job = NewImportJob {
            reference_type: mapping.mapped_record_type.clone(),
            import_type: kind,
            import_file,
            mute_notifications: mapping.mute_notifications,
            submit_after_import: mapping.submit_after_import,
            spreadsheet_id: parent.id.clone(),
            worksheet_id: mapping.name.clone(),
            row_start,
            row_end,
        };

        let job_id = self.records.create_import_job(&job).await?;
        self.queue.enqueue(&job_id).await?;

        tracing::debug!(
            job_id = %job_id,
            mapping = %mapping.name,
            file = %job.import_file,
            "Import job dispatched"
        );

        Ok(job_id)
    }
}
