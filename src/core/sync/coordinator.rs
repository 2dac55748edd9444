//! Sync coordinator - runs imports for every configured mapping
//!
//! Wires the collaborators from configuration, merges configured mappings
//! with their stored checkpoints and drives the import controller. Different
//! mappings run concurrently; a mapping is processed at most once per run.

use crate::adapters::database::create_record_backend;
use crate::adapters::database::traits::RecordStore;
use crate::adapters::files::LocalPayloadStore;
use crate::adapters::sheets::GoogleSheetsClient;
use crate::config::SyncConfig;
use crate::core::import::{ImportController, ImportDispatcher, ImportOutcome};
use crate::core::state::{StateManager, WorksheetMapping};
use crate::core::sync::summary::{MappingReport, MappingStatus, SyncSummary};
use crate::domain::ids::MappingId;
use crate::domain::import_job::JobStatus;
use crate::domain::{Result, SpreadsheetRef, SyncError};
use crate::log_error_with_context;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Restricts a run to one spreadsheet or one mapping
#[derive(Debug, Clone, Default)]
pub struct SyncFilter {
    /// Spreadsheet configuration id
    pub spreadsheet: Option<String>,

    /// Mapping name
    pub mapping: Option<String>,
}

/// Stored state of a configured mapping
#[derive(Debug, Clone)]
pub struct MappingState {
    /// Parent spreadsheet
    pub parent: SpreadsheetRef,

    /// Configured settings merged with the stored checkpoint
    pub mapping: WorksheetMapping,

    /// Status of the last import job, when known
    pub last_status: Option<JobStatus>,
}

/// Sync coordinator
pub struct SyncCoordinator {
    config: SyncConfig,
    controller: Arc<ImportController>,
    records: Arc<dyn RecordStore + Send + Sync>,
    state: Arc<StateManager>,
    shutdown: watch::Receiver<bool>,
}

impl SyncCoordinator {
    /// Create a coordinator from configuration
    ///
    /// Connects the record store and creates its schema.
    pub async fn new(config: SyncConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let sheets = Arc::new(GoogleSheetsClient::new(config.sheets.clone())?);

        let backend = create_record_backend(&config)?;
        backend.records.test_connection().await?;
        backend.records.ensure_schema().await?;

        let payloads = Arc::new(LocalPayloadStore::new(&config.storage.payload_dir));
        let dispatcher =
            ImportDispatcher::new(payloads, backend.records.clone(), backend.queue.clone());

        let state = Arc::new(StateManager::new_with_storage(backend.mappings.clone()));

        let controller = ImportController::new(
            sheets,
            backend.records.clone(),
            dispatcher,
            state.clone(),
        )
        .with_dry_run(config.application.dry_run);

        Ok(Self::from_parts(
            config,
            Arc::new(controller),
            backend.records,
            state,
            shutdown,
        ))
    }

    /// Create a coordinator over existing collaborators
    pub fn from_parts(
        config: SyncConfig,
        controller: Arc<ImportController>,
        records: Arc<dyn RecordStore + Send + Sync>,
        state: Arc<StateManager>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            controller,
            records,
            state,
            shutdown,
        }
    }

    /// Run one sync pass over the selected mappings
    pub async fn run_once(&self, filter: &SyncFilter) -> Result<SyncSummary> {
        let start_time = Instant::now();
        let targets = self.targets(filter)?;

        tracing::info!(
            mappings = targets.len(),
            parallel = self.config.sync.parallel_mappings,
            dry_run = self.config.application.dry_run,
            "Starting sync"
        );

        let reports: Vec<MappingReport> = stream::iter(targets)
            .map(|(parent, configured)| self.sync_mapping(parent, configured))
            .buffer_unordered(self.config.sync.parallel_mappings)
            .collect()
            .await;

        let mut summary = SyncSummary::new();
        for report in reports {
            summary.add_report(report);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Run sync passes every `interval` until shutdown is requested
    ///
    /// Passes never overlap, so a mapping is never imported twice at once.
    pub async fn run_watch(&self, filter: &SyncFilter, interval: Duration) -> Result<SyncSummary> {
        let mut shutdown = self.shutdown.clone();
        let mut total: Option<SyncSummary> = None;

        loop {
            let summary = self.run_once(filter).await?;
            match total.as_mut() {
                Some(total) => total.absorb(summary),
                None => total = Some(summary),
            }

            if *shutdown.borrow() {
                break;
            }

            tracing::info!(interval_secs = interval.as_secs(), "Waiting for next sync");

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        let mut total = total.unwrap_or_default();
        if *self.shutdown.borrow() {
            total.interrupted = true;
        }
        Ok(total)
    }

    /// Re-send all rows of one mapping as an update import
    pub async fn run_update(&self, mapping_name: &str) -> Result<ImportOutcome> {
        let filter = SyncFilter {
            spreadsheet: None,
            mapping: Some(mapping_name.to_string()),
        };

        let Some((parent, configured)) = self.targets(&filter)?.into_iter().next() else {
            return Err(SyncError::Configuration(format!(
                "Unknown mapping '{mapping_name}'"
            )));
        };

        let mut mapping = self.state.resolve_mapping(&configured).await?;
        self.controller
            .trigger_update_import(&parent, &mut mapping)
            .await
    }

    /// Stored state of the selected mappings
    pub async fn status(&self, filter: &SyncFilter) -> Result<Vec<MappingState>> {
        let mut states = Vec::new();

        for (parent, configured) in self.targets(filter)? {
            let mapping = self.state.resolve_mapping(&configured).await?;
            let last_status = match mapping.last_import {
                Some(job_id) => self.records.job_status(&job_id).await?,
                None => None,
            };

            states.push(MappingState {
                parent,
                mapping,
                last_status,
            });
        }

        Ok(states)
    }

    /// Release a mapping blocked by a failed import
    pub async fn clear_last_import(&self, mapping_name: &str) -> Result<bool> {
        let name = MappingId::new(mapping_name).map_err(SyncError::InvalidArgument)?;
        self.state.clear_last_import(&name).await
    }

    async fn sync_mapping(
        &self,
        parent: SpreadsheetRef,
        configured: WorksheetMapping,
    ) -> MappingReport {
        let spreadsheet = parent.id.clone();
        let name = configured.name.clone();

        if *self.shutdown.borrow() {
            tracing::info!(mapping = %name, "Shutdown requested; skipping mapping");
            return MappingReport {
                spreadsheet,
                mapping: name,
                status: MappingStatus::Skipped,
            };
        }

        let result = match self.state.resolve_mapping(&configured).await {
            Ok(mut mapping) => self.controller.trigger_import(&parent, &mut mapping).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            log_error_with_context!(e, format!("Import of mapping {name} failed"));
        }

        MappingReport {
            spreadsheet,
            mapping: name,
            status: MappingStatus::from_result(&result),
        }
    }

    /// Configured mappings matching the filter, in configuration order
    fn targets(&self, filter: &SyncFilter) -> Result<Vec<(SpreadsheetRef, WorksheetMapping)>> {
        if let Some(id) = &filter.spreadsheet {
            if self.config.spreadsheet(id).is_none() {
                return Err(SyncError::Configuration(format!(
                    "Unknown spreadsheet '{id}'"
                )));
            }
        }

        let mut targets = Vec::new();
        for spreadsheet in &self.config.spreadsheets {
            if filter
                .spreadsheet
                .as_ref()
                .is_some_and(|id| *id != spreadsheet.id)
            {
                continue;
            }

            let parent = spreadsheet
                .spreadsheet_ref()
                .map_err(SyncError::Configuration)?;

            for mapping in spreadsheet.mappings().map_err(SyncError::Configuration)? {
                if filter
                    .mapping
                    .as_ref()
                    .is_some_and(|name| name != mapping.name.as_str())
                {
                    continue;
                }
                targets.push((parent.clone(), mapping));
            }
        }

        if let Some(name) = &filter.mapping {
            if targets.is_empty() {
                return Err(SyncError::Configuration(format!("Unknown mapping '{name}'")));
            }
        }

        Ok(targets)
    }
}
