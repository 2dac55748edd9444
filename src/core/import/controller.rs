//! Checkpoint and guard controller
//!
//! Entry point of a worksheet import. Checks the mapping, refuses to run while
//! the previous import sits in `Error`, routes on the import kind and commits
//! the new checkpoint only after the job was dispatched.

use super::dispatcher::{DispatchRequest, ImportDispatcher};
use super::ImportKind;
use crate::adapters::database::traits::RecordStore;
use crate::adapters::sheets::SpreadsheetService;
use crate::core::extract::{extract_delta, RowDelta};
use crate::core::payload::encode_payload;
use crate::core::state::{StateManager, WorksheetMapping};
use crate::domain::ids::JobId;
use crate::domain::{Result, SpreadsheetRef, SyncError};
use crate::{log_import_blocked, log_import_dispatched};
use std::sync::Arc;

/// Result of one import trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// A job was created and enqueued
    Dispatched {
        /// The new job
        job_id: JobId,
        /// Data rows carried by the job
        rows: usize,
    },

    /// No unimported rows; nothing was dispatched and state is unchanged
    NothingToImport,

    /// Dry run: rows that would have been dispatched
    DryRun {
        /// Data rows in the delta
        rows: usize,
        /// First data row of the delta
        row_start: u64,
    },
}

/// Drives imports for worksheet mappings
pub struct ImportController {
    sheets: Arc<dyn SpreadsheetService + Send + Sync>,
    records: Arc<dyn RecordStore + Send + Sync>,
    dispatcher: ImportDispatcher,
    state: Arc<StateManager>,
    dry_run: bool,
}

impl ImportController {
    /// Create a controller
    pub fn new(
        sheets: Arc<dyn SpreadsheetService + Send + Sync>,
        records: Arc<dyn RecordStore + Send + Sync>,
        dispatcher: ImportDispatcher,
        state: Arc<StateManager>,
    ) -> Self {
        Self {
            sheets,
            records,
            dispatcher,
            state,
            dry_run: false,
        }
    }

    /// Compute deltas without dispatching jobs or saving state
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Import the rows appended since the last import
    ///
    /// Checks run in order, before anything is fetched:
    /// 1. the mapping has a target record type (`Validation`)
    /// 2. the import type label resolves (`InvalidArgument`)
    /// 3. the previous import did not fail (`Validation`)
    ///
    /// `Insert` and `Upsert` are routed to their import paths. `Update`
    /// rewrites existing records and is refused here; use
    /// [`trigger_update_import`](Self::trigger_update_import).
    ///
    /// On success `mapping` holds the committed checkpoint. On any error it
    /// is left unchanged.
    pub async fn trigger_import(
        &self,
        parent: &SpreadsheetRef,
        mapping: &mut WorksheetMapping,
    ) -> Result<ImportOutcome> {
        require_record_type(mapping)?;
        let kind = ImportKind::resolve(&mapping.import_type)?;
        self.guard(mapping).await?;

        match kind {
            ImportKind::Insert | ImportKind::Upsert => {
                self.import_delta(parent, mapping, kind).await
            }
            ImportKind::Update => Err(SyncError::InvalidArgument(format!(
                "Mapping '{}' uses import type Update, which is not imported incrementally; \
                 run an explicit update import instead",
                mapping.name
            ))),
        }
    }

    /// Insert path: dispatch the delta as an `Insert` job
    ///
    /// Runs the record type check and the failed-import guard of
    /// [`trigger_import`](Self::trigger_import) before fetching.
    pub async fn trigger_insert_import(
        &self,
        parent: &SpreadsheetRef,
        mapping: &mut WorksheetMapping,
    ) -> Result<ImportOutcome> {
        self.preflight(mapping).await?;
        self.import_delta(parent, mapping, ImportKind::Insert).await
    }

    /// Upsert path: require the identifier column, then dispatch the delta
    /// as an `Upsert` job
    ///
    /// Same checks as [`trigger_insert_import`](Self::trigger_insert_import).
    pub async fn trigger_upsert_import(
        &self,
        parent: &SpreadsheetRef,
        mapping: &mut WorksheetMapping,
    ) -> Result<ImportOutcome> {
        self.preflight(mapping).await?;
        self.import_delta(parent, mapping, ImportKind::Upsert).await
    }

    /// Re-send every data row as an `Update` job
    ///
    /// Same record type check and guard as
    /// [`trigger_import`](Self::trigger_import), and the identifier column is
    /// required. The counter is left as is; only the last import reference
    /// moves.
    pub async fn trigger_update_import(
        &self,
        parent: &SpreadsheetRef,
        mapping: &mut WorksheetMapping,
    ) -> Result<ImportOutcome> {
        let kind = ImportKind::Update;
        self.preflight(mapping).await?;
        self.require_id_field(parent, mapping, kind).await?;

        let rows = self
            .sheets
            .get_all_values(&parent.url, mapping.worksheet_id)
            .await?;
        let delta = extract_delta(rows, 0, true);

        if delta.is_empty() {
            tracing::info!(mapping = %mapping.name, "No data rows to update");
            return Ok(ImportOutcome::NothingToImport);
        }

        if self.dry_run {
            return Ok(self.dry_run_outcome(mapping, kind, &delta));
        }

        let job_id = self.dispatch_delta(parent, mapping, kind, &delta).await?;

        let mut updated = mapping.clone();
        updated.record_update(job_id);
        self.commit(mapping, updated, job_id).await?;

        log_import_dispatched!(mapping.name, job_id, kind, delta.len());
        Ok(ImportOutcome::Dispatched {
            job_id,
            rows: delta.len(),
        })
    }

    /// Header cell of the worksheet's identifier column
    ///
    /// Fetches the header row on every call, so a changed record type or a
    /// renamed column is picked up.
    ///
    /// # Errors
    ///
    /// `Validation` when the record type is empty or no column matches.
    pub async fn worksheet_id_field(
        &self,
        parent: &SpreadsheetRef,
        mapping: &WorksheetMapping,
    ) -> Result<String> {
        require_record_type(mapping)?;

        let header = self
            .sheets
            .get_header_row(&parent.url, mapping.worksheet_id)
            .await?;

        find_id_field(&header, &mapping.mapped_record_type)
    }

    async fn preflight(&self, mapping: &WorksheetMapping) -> Result<()> {
        require_record_type(mapping)?;
        self.guard(mapping).await
    }

    /// Look up the identifier column when `kind` needs one
    async fn require_id_field(
        &self,
        parent: &SpreadsheetRef,
        mapping: &WorksheetMapping,
        kind: ImportKind,
    ) -> Result<()> {
        if !kind.requires_id_field() {
            return Ok(());
        }

        let id_field = self.worksheet_id_field(parent, mapping).await?;
        tracing::debug!(mapping = %mapping.name, id_field = %id_field, "Identifier column found");
        Ok(())
    }

    /// Fail when the last dispatched job ended in `Error`
    async fn guard(&self, mapping: &WorksheetMapping) -> Result<()> {
        let Some(job_id) = mapping.last_import else {
            return Ok(());
        };

        match self.records.job_status(&job_id).await? {
            Some(status) if status.blocks_next_import() => {
                log_import_blocked!(mapping.name, job_id);
                Err(SyncError::Validation(format!(
                    "Mapping '{}' is blocked: previous import {job_id} failed. \
                     Fix the failed import and clear it before importing again",
                    mapping.name
                )))
            }
            Some(_) => Ok(()),
            None => {
                tracing::warn!(
                    mapping = %mapping.name,
                    job_id = %job_id,
                    "Last import job not found in record store; not blocking"
                );
                Ok(())
            }
        }
    }

    async fn import_delta(
        &self,
        parent: &SpreadsheetRef,
        mapping: &mut WorksheetMapping,
        kind: ImportKind,
    ) -> Result<ImportOutcome> {
        self.require_id_field(parent, mapping, kind).await?;

        let rows = self
            .sheets
            .get_all_values(&parent.url, mapping.worksheet_id)
            .await?;
        let delta = extract_delta(rows, mapping.counter, mapping.pending_reset());

        if delta.is_empty() {
            tracing::debug!(
                mapping = %mapping.name,
                counter = mapping.counter,
                "No new rows to import"
            );
            return Ok(ImportOutcome::NothingToImport);
        }

        if self.dry_run {
            return Ok(self.dry_run_outcome(mapping, kind, &delta));
        }

        let job_id = self.dispatch_delta(parent, mapping, kind, &delta).await?;

        let mut updated = mapping.clone();
        updated.record_import(job_id, delta.len() as u64);
        self.commit(mapping, updated, job_id).await?;

        log_import_dispatched!(mapping.name, job_id, kind, delta.len());
        Ok(ImportOutcome::Dispatched {
            job_id,
            rows: delta.len(),
        })
    }

    async fn dispatch_delta(
        &self,
        parent: &SpreadsheetRef,
        mapping: &WorksheetMapping,
        kind: ImportKind,
        delta: &RowDelta,
    ) -> Result<JobId> {
        let payload = encode_payload(&delta.header, &delta.rows)?;

        self.dispatcher
            .dispatch(DispatchRequest {
                parent,
                mapping,
                kind,
                payload,
                row_start: delta.start,
                row_end: delta.end(),
            })
            .await
    }

    /// Persist the new checkpoint, then replace the caller's mapping
    async fn commit(
        &self,
        mapping: &mut WorksheetMapping,
        updated: WorksheetMapping,
        job_id: JobId,
    ) -> Result<()> {
        if let Err(e) = self.state.checkpoint(&updated).await {
            tracing::error!(
                mapping = %mapping.name,
                job_id = %job_id,
                error = %e,
                "Import job dispatched but checkpoint not saved; rows will be sent again"
            );
            return Err(e);
        }

        *mapping = updated;
        Ok(())
    }

    fn dry_run_outcome(
        &self,
        mapping: &WorksheetMapping,
        kind: ImportKind,
        delta: &RowDelta,
    ) -> ImportOutcome {
        tracing::info!(
            mapping = %mapping.name,
            import_type = %kind,
            rows = delta.len(),
            row_start = delta.start,
            "DRY RUN: Would dispatch import job"
        );

        ImportOutcome::DryRun {
            rows: delta.len(),
            row_start: delta.start,
        }
    }
}

fn require_record_type(mapping: &WorksheetMapping) -> Result<()> {
    if mapping.mapped_record_type.trim().is_empty() {
        return Err(SyncError::Validation(format!(
            "Mapping '{}' has no mapped record type",
            mapping.name
        )));
    }
    Ok(())
}

/// Find the identifier column in a header row
///
/// A column matches when its label, trimmed and compared case-insensitively,
/// is `ID` or `<record type> ID`. The first match is returned verbatim.
///
/// # Errors
///
/// `Validation` when no column matches.
///
/// # Examples
///
/// ```
/// use sheetsync::core::import::find_id_field;
///
/// let header = vec!["Name".to_string(), "ToDo ID".to_string()];
/// assert_eq!(find_id_field(&header, "ToDo").unwrap(), "ToDo ID");
/// ```
pub fn find_id_field(header: &[String], record_type: &str) -> Result<String> {
    let plain = "id";
    let qualified = format!("{} id", record_type.trim().to_lowercase());

    header
        .iter()
        .find(|cell| {
            let label = cell.trim().to_lowercase();
            label == plain || label == qualified
        })
        .cloned()
        .ok_or_else(|| {
            SyncError::Validation(format!(
                "Worksheet has no identifier column: expected 'ID' or '{} ID' in header [{}]",
                record_type.trim(),
                header.join(", ")
            ))
        })
}
