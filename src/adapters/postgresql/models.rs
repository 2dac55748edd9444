//! PostgreSQL row models
//!
//! This module defines the row structures used when storing mappings and
//! import jobs in PostgreSQL.

use crate::core::state::mapping::WorksheetMapping;
use crate::domain::ids::{JobId, MappingId, SpreadsheetId, WorksheetId};
use crate::domain::import_job::NewImportJob;
use crate::domain::{RecordStoreError, Result, SyncError};
use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use uuid::Uuid;

/// Worksheet mapping row
///
/// This structure maps to the `worksheet_mappings` table.
#[derive(Debug, Clone)]
pub struct PostgreSQLMapping {
    pub name: String,
    pub parent: String,
    pub position: i32,
    pub worksheet_id: i64,
    pub mapped_record_type: String,
    pub import_type: String,
    pub counter: i64,
    pub last_import: Option<Uuid>,
    pub reset_on_import: bool,
    pub reset_applied: bool,
    pub mute_notifications: bool,
    pub submit_after_import: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl PostgreSQLMapping {
    /// Convert from domain mapping to row
    pub fn from_domain(mapping: &WorksheetMapping) -> Result<Self> {
        Ok(Self {
            name: mapping.name.to_string(),
            parent: mapping.parent.to_string(),
            position: to_i32(mapping.position as u64, "position")?,
            worksheet_id: to_i64(mapping.worksheet_id.value(), "worksheet_id")?,
            mapped_record_type: mapping.mapped_record_type.clone(),
            import_type: mapping.import_type.clone(),
            counter: to_i64(mapping.counter, "counter")?,
            last_import: mapping.last_import.map(|id| *id.as_uuid()),
            reset_on_import: mapping.reset_on_import,
            reset_applied: mapping.reset_applied,
            mute_notifications: mapping.mute_notifications,
            submit_after_import: mapping.submit_after_import,
            last_synced_at: mapping.last_synced_at,
        })
    }

    /// Read a row of `worksheet_mappings`
    pub fn from_row(row: &Row) -> Self {
        Self {
            name: row.get("name"),
            parent: row.get("parent"),
            position: row.get("position"),
            worksheet_id: row.get("worksheet_id"),
            mapped_record_type: row.get("mapped_record_type"),
            import_type: row.get("import_type"),
            counter: row.get("counter"),
            last_import: row.get("last_import"),
            reset_on_import: row.get("reset_on_import"),
            reset_applied: row.get("reset_applied"),
            mute_notifications: row.get("mute_notifications"),
            submit_after_import: row.get("submit_after_import"),
            last_synced_at: row.get("last_synced_at"),
        }
    }

    /// Convert to domain mapping
    pub fn to_domain(&self) -> Result<WorksheetMapping> {
        let name = MappingId::new(self.name.clone()).map_err(invalid_data)?;
        let parent = SpreadsheetId::new(self.parent.clone()).map_err(invalid_data)?;

        Ok(WorksheetMapping {
            name,
            parent,
            position: to_unsigned(self.position as i64, "position")? as u32,
            worksheet_id: WorksheetId::new(to_unsigned(self.worksheet_id, "worksheet_id")?),
            mapped_record_type: self.mapped_record_type.clone(),
            import_type: self.import_type.clone(),
            counter: to_unsigned(self.counter, "counter")?,
            last_import: self.last_import.map(JobId::from_uuid),
            reset_on_import: self.reset_on_import,
            reset_applied: self.reset_applied,
            mute_notifications: self.mute_notifications,
            submit_after_import: self.submit_after_import,
            last_synced_at: self.last_synced_at,
        })
    }
}

/// Import job row
///
/// This structure maps to the `import_jobs` table.
#[derive(Debug, Clone)]
pub struct PostgreSQLImportJob {
    pub id: Uuid,
    pub reference_type: String,
    pub import_type: String,
    pub import_file: String,
    pub mute_notifications: bool,
    pub submit_after_import: bool,
    pub spreadsheet_id: String,
    pub worksheet_id: String,
    pub row_start: i64,
    pub row_end: i64,
}

impl PostgreSQLImportJob {
    /// Convert a creation request to a row with the given id
    pub fn from_domain(id: JobId, job: &NewImportJob) -> Result<Self> {
        Ok(Self {
            id: *id.as_uuid(),
            reference_type: job.reference_type.clone(),
            import_type: job.import_type.label().to_string(),
            import_file: job.import_file.to_string(),
            mute_notifications: job.mute_notifications,
            submit_after_import: job.submit_after_import,
            spreadsheet_id: job.spreadsheet_id.to_string(),
            worksheet_id: job.worksheet_id.to_string(),
            row_start: to_i64(job.row_start, "row_start")?,
            row_end: to_i64(job.row_end, "row_end")?,
        })
    }
}

fn invalid_data(message: String) -> SyncError {
    SyncError::RecordStore(RecordStoreError::InvalidData(message))
}

fn to_i64(value: u64, field: &str) -> Result<i64> {
    i64::try_from(value).map_err(|_| invalid_data(format!("{field} out of range: {value}")))
}

fn to_i32(value: u64, field: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| invalid_data(format!("{field} out of range: {value}")))
}

fn to_unsigned(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| invalid_data(format!("negative {field}: {value}")))
}
