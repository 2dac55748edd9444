//! Worksheet mapping model
//!
//! A mapping binds one remote worksheet to one target record type. Besides
//! the user-editable settings it carries the import checkpoint: how many data
//! rows were already imported and which job was dispatched last.

use crate::domain::ids::{JobId, MappingId, SpreadsheetId, WorksheetId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default import type label for new mappings
pub const DEFAULT_IMPORT_TYPE: &str = "Insert";

/// Binding of a remote worksheet to a target record type
///
/// # Examples
///
/// ```
/// use sheetsync::core::state::mapping::WorksheetMappingBuilder;
/// use sheetsync::domain::ids::{MappingId, SpreadsheetId, WorksheetId};
///
/// let mapping = WorksheetMappingBuilder::new(
///     MappingId::new("orders-0").unwrap(),
///     SpreadsheetId::new("orders").unwrap(),
///     WorksheetId::new(0),
/// )
/// .mapped_record_type("Sales Order")
/// .counter(12)
/// .build();
///
/// assert_eq!(mapping.counter, 12);
/// assert_eq!(mapping.import_type, "Insert");
/// assert!(mapping.last_import.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetMapping {
    /// Stable name of the binding
    pub name: MappingId,

    /// Parent spreadsheet configuration (reference only)
    pub parent: SpreadsheetId,

    /// Ordering index inside the parent
    pub position: u32,

    /// Remote worksheet handle
    pub worksheet_id: WorksheetId,

    /// Target record type; must be non-empty before an import is triggered
    pub mapped_record_type: String,

    /// Import type label as configured (`Insert`, `Update` or `Upsert`)
    pub import_type: String,

    /// Number of data rows already imported
    pub counter: u64,

    /// Most recently dispatched import job
    pub last_import: Option<JobId>,

    /// Import every data row on the next run, ignoring the counter
    pub reset_on_import: bool,

    /// A reset import was already dispatched while `reset_on_import` was set
    #[serde(default)]
    pub reset_applied: bool,

    /// Passed through to dispatched jobs
    pub mute_notifications: bool,

    /// Passed through to dispatched jobs
    pub submit_after_import: bool,

    /// When the checkpoint was last committed
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl WorksheetMapping {
    /// Whether the next import must ignore the counter
    ///
    /// A reset is honoured once per time the flag is switched on.
    pub fn pending_reset(&self) -> bool {
        self.reset_on_import && !self.reset_applied
    }

    /// Record a successful dispatch of `imported` rows as job `job_id`
    ///
    /// A reset import restarts the count, so the counter becomes the size of
    /// the dispatched delta, and the reset is marked as consumed. Otherwise
    /// the counter grows by it.
    pub fn record_import(&mut self, job_id: JobId, imported: u64) {
        let base = if self.pending_reset() {
            self.reset_applied = true;
            0
        } else {
            self.counter
        };
        self.counter = base.saturating_add(imported);
        self.last_import = Some(job_id);
        self.last_synced_at = Some(Utc::now());
    }

    /// Record a dispatch that does not move the counter (full-sheet updates)
    pub fn record_update(&mut self, job_id: JobId) {
        self.last_import = Some(job_id);
        self.last_synced_at = Some(Utc::now());
    }

    /// Take over the user-editable settings of another mapping, keeping the checkpoint
    ///
    /// Used when configuration is merged with persisted state: the file wins
    /// for settings, the store wins for `counter`, `last_import` and
    /// `last_synced_at`. Switching the reset flag off re-arms it for the next
    /// time it is switched on.
    pub fn apply_settings(&mut self, settings: &WorksheetMapping) {
        self.parent = settings.parent.clone();
        self.position = settings.position;
        self.worksheet_id = settings.worksheet_id;
        self.mapped_record_type = settings.mapped_record_type.clone();
        self.import_type = settings.import_type.clone();
        self.reset_on_import = settings.reset_on_import;
        if !settings.reset_on_import {
            self.reset_applied = false;
        }
        self.mute_notifications = settings.mute_notifications;
        self.submit_after_import = settings.submit_after_import;
    }
}

/// Builder for creating WorksheetMapping instances
pub struct WorksheetMappingBuilder {
    name: MappingId,
    parent: SpreadsheetId,
    position: u32,
    worksheet_id: WorksheetId,
    mapped_record_type: String,
    import_type: String,
    counter: u64,
    last_import: Option<JobId>,
    reset_on_import: bool,
    mute_notifications: bool,
    submit_after_import: bool,
    last_synced_at: Option<DateTime<Utc>>,
}

impl WorksheetMappingBuilder {
    /// Create a new builder
    ///
    /// # Arguments
    ///
    /// * `name` - Stable name of the binding
    /// * `parent` - Parent spreadsheet configuration id
    /// * `worksheet_id` - Remote worksheet handle
    pub fn new(name: MappingId, parent: SpreadsheetId, worksheet_id: WorksheetId) -> Self {
        Self {
            name,
            parent,
            position: 0,
            worksheet_id,
            mapped_record_type: String::new(),
            import_type: DEFAULT_IMPORT_TYPE.to_string(),
            counter: 0,
            last_import: None,
            reset_on_import: false,
            mute_notifications: false,
            submit_after_import: false,
            last_synced_at: None,
        }
    }

    /// Set the ordering index
    pub fn position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Set the target record type
    pub fn mapped_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.mapped_record_type = record_type.into();
        self
    }

    /// Set the import type label
    pub fn import_type(mut self, label: impl Into<String>) -> Self {
        self.import_type = label.into();
        self
    }

    /// Set the imported row counter
    pub fn counter(mut self, counter: u64) -> Self {
        self.counter = counter;
        self
    }

    /// Set the last dispatched job
    pub fn last_import(mut self, job_id: JobId) -> Self {
        self.last_import = Some(job_id);
        self
    }

    /// Set the reset flag
    pub fn reset_on_import(mut self, reset: bool) -> Self {
        self.reset_on_import = reset;
        self
    }

    /// Set the mute flag
    pub fn mute_notifications(mut self, mute: bool) -> Self {
        self.mute_notifications = mute;
        self
    }

    /// Set the submit flag
    pub fn submit_after_import(mut self, submit: bool) -> Self {
        self.submit_after_import = submit;
        self
    }

    /// Set the last checkpoint time
    pub fn last_synced_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_synced_at = Some(timestamp);
        self
    }

    /// Build the WorksheetMapping instance
    pub fn build(self) -> WorksheetMapping {
        WorksheetMapping {
            name: self.name,
            parent: self.parent,
            position: self.position,
            worksheet_id: self.worksheet_id,
            mapped_record_type: self.mapped_record_type,
            import_type: self.import_type,
            counter: self.counter,
            last_import: self.last_import,
            reset_on_import: self.reset_on_import,
            reset_applied: false,
            mute_notifications: self.mute_notifications,
            submit_after_import: self.submit_after_import,
            last_synced_at: self.last_synced_at,
        }
    }
}
