//! PostgreSQL adapter implementing the record store traits
//!
//! One adapter serves as job store, job queue and mapping store. Enqueueing
//! stamps the job and publishes its id on a `NOTIFY` channel that job
//! executors `LISTEN` on.

use crate::adapters::database::traits::{JobQueue, MappingStore, RecordStore};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{PostgreSQLImportJob, PostgreSQLMapping};
use crate::core::state::mapping::WorksheetMapping;
use crate::domain::ids::{JobId, MappingId};
use crate::domain::import_job::{JobStatus, NewImportJob};
use crate::domain::{RecordStoreError, Result, SyncError};
use async_trait::async_trait;
use std::sync::Arc;

/// Channel job executors listen on
pub const IMPORT_JOB_CHANNEL: &str = "sheetsync_import_jobs";

/// PostgreSQL implementation of the record store traits
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

#[async_trait]
impl RecordStore for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_database_exists().await
    }

    async fn create_import_job(&self, job: &NewImportJob) -> Result<JobId> {
        let id = JobId::generate();
        let row = PostgreSQLImportJob::from_domain(id, job)?;

        let insert_query = r#"
            INSERT INTO import_jobs (
                id, reference_type, import_type, import_file,
                mute_notifications, submit_after_import,
                spreadsheet_id, worksheet_id, row_start, row_end, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'Pending')
        "#;

        self.client
            .execute(
                insert_query,
                &[
                    &row.id,
                    &row.reference_type,
                    &row.import_type,
                    &row.import_file,
                    &row.mute_notifications,
                    &row.submit_after_import,
                    &row.spreadsheet_id,
                    &row.worksheet_id,
                    &row.row_start,
                    &row.row_end,
                ],
            )
            .await?;

        tracing::debug!(
            job_id = %id,
            mapping = %job.worksheet_id,
            import_type = %job.import_type,
            "Import job created in PostgreSQL"
        );

        Ok(id)
    }

    async fn job_status(&self, job_id: &JobId) -> Result<Option<JobStatus>> {
        let rows = self
            .client
            .query(
                "SELECT status FROM import_jobs WHERE id = $1",
                &[job_id.as_uuid()],
            )
            .await?;

        match rows.first() {
            Some(row) => {
                let status: String = row.get("status");
                let status = status.parse::<JobStatus>().map_err(|e| {
                    SyncError::RecordStore(RecordStoreError::InvalidData(e))
                })?;
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl JobQueue for PostgreSQLAdapter {
    async fn enqueue(&self, job_id: &JobId) -> Result<()> {
        let stamped = self
            .client
            .execute(
                "UPDATE import_jobs SET enqueued_at = NOW() WHERE id = $1",
                &[job_id.as_uuid()],
            )
            .await?;

        if stamped == 0 {
            return Err(SyncError::RecordStore(RecordStoreError::EnqueueFailed(
                format!("import job {job_id} does not exist"),
            )));
        }

        let payload = job_id.to_string();
        self.client
            .query("SELECT pg_notify($1, $2)", &[&IMPORT_JOB_CHANNEL, &payload])
            .await
            .map_err(|e| {
                SyncError::RecordStore(RecordStoreError::EnqueueFailed(format!(
                    "failed to notify {IMPORT_JOB_CHANNEL}: {e}"
                )))
            })?;

        tracing::debug!(job_id = %job_id, channel = IMPORT_JOB_CHANNEL, "Import job enqueued");
        Ok(())
    }
}

#[async_trait]
impl MappingStore for PostgreSQLAdapter {
    async fn load_mapping(&self, name: &MappingId) -> Result<Option<WorksheetMapping>> {
        tracing::debug!(mapping = %name, "Loading mapping from PostgreSQL");

        let rows = self
            .client
            .query(
                "SELECT * FROM worksheet_mappings WHERE name = $1",
                &[&name.as_str()],
            )
            .await?;

        rows.first()
            .map(|row| PostgreSQLMapping::from_row(row).to_domain())
            .transpose()
    }

    async fn save_mapping(&self, mapping: &WorksheetMapping) -> Result<()> {
        let row = PostgreSQLMapping::from_domain(mapping)?;

        let upsert_query = r#"
            INSERT INTO worksheet_mappings (
                name, parent, position, worksheet_id, mapped_record_type,
                import_type, counter, last_import, reset_on_import, reset_applied,
                mute_notifications, submit_after_import, last_synced_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW())
            ON CONFLICT (name) DO UPDATE SET
                parent = EXCLUDED.parent,
                position = EXCLUDED.position,
                worksheet_id = EXCLUDED.worksheet_id,
                mapped_record_type = EXCLUDED.mapped_record_type,
                import_type = EXCLUDED.import_type,
                counter = EXCLUDED.counter,
                last_import = EXCLUDED.last_import,
                reset_on_import = EXCLUDED.reset_on_import,
                reset_applied = EXCLUDED.reset_applied,
                mute_notifications = EXCLUDED.mute_notifications,
                submit_after_import = EXCLUDED.submit_after_import,
                last_synced_at = EXCLUDED.last_synced_at,
                updated_at = NOW()
        "#;

        self.client
            .execute(
                upsert_query,
                &[
                    &row.name,
                    &row.parent,
                    &row.position,
                    &row.worksheet_id,
                    &row.mapped_record_type,
                    &row.import_type,
                    &row.counter,
                    &row.last_import,
                    &row.reset_on_import,
                    &row.reset_applied,
                    &row.mute_notifications,
                    &row.submit_after_import,
                    &row.last_synced_at,
                ],
            )
            .await?;

        tracing::debug!(
            mapping = %mapping.name,
            counter = mapping.counter,
            "Mapping saved to PostgreSQL"
        );

        Ok(())
    }

    async fn clear_last_import(&self, name: &MappingId) -> Result<bool> {
        let updated = self
            .client
            .execute(
                "UPDATE worksheet_mappings SET last_import = NULL, updated_at = NOW() WHERE name = $1",
                &[&name.as_str()],
            )
            .await?;

        Ok(updated > 0)
    }
}
