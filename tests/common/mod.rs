//! In-memory collaborators for driving the import engine in tests

#![allow(dead_code)]

use async_trait::async_trait;
use sheetsync::adapters::database::{JobQueue, MappingStore, RecordStore};
use sheetsync::adapters::files::PayloadStore;
use sheetsync::adapters::sheets::SpreadsheetService;
use sheetsync::core::import::{ImportController, ImportDispatcher};
use sheetsync::core::state::mapping::WorksheetMappingBuilder;
use sheetsync::core::state::{StateManager, WorksheetMapping};
use sheetsync::domain::{
    JobId, JobStatus, MappingId, NewImportJob, PayloadRef, RecordStoreError, Result, Row,
    SpreadsheetError, SpreadsheetId, SpreadsheetRef, SyncError, WorksheetId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SPREADSHEET_URL: &str = "https://docs.google.com/spreadsheets/d/abc123/edit";

pub fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

pub fn parent() -> SpreadsheetRef {
    SpreadsheetRef::new(
        SpreadsheetId::new("orders").unwrap(),
        "Orders",
        SPREADSHEET_URL,
    )
}

pub fn mapping(record_type: &str, import_type: &str) -> WorksheetMapping {
    WorksheetMappingBuilder::new(
        MappingId::new("orders-0").unwrap(),
        SpreadsheetId::new("orders").unwrap(),
        WorksheetId::new(0),
    )
    .mapped_record_type(record_type)
    .import_type(import_type)
    .build()
}

/// Worksheets keyed by remote worksheet id
#[derive(Default)]
pub struct FakeSheets {
    worksheets: Mutex<HashMap<u64, Vec<Row>>>,
    offline: AtomicBool,
    pub fetches: AtomicUsize,
}

impl FakeSheets {
    pub fn set_values(&self, worksheet_id: u64, rows: Vec<Row>) {
        self.worksheets.lock().unwrap().insert(worksheet_id, rows);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn rows(&self, worksheet_id: WorksheetId) -> Result<Vec<Row>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(SpreadsheetError::ConnectionFailed("offline".to_string()).into());
        }
        self.worksheets
            .lock()
            .unwrap()
            .get(&worksheet_id.value())
            .cloned()
            .ok_or_else(|| SpreadsheetError::WorksheetNotFound(worksheet_id.to_string()).into())
    }
}

#[async_trait]
impl SpreadsheetService for FakeSheets {
    async fn get_all_values(&self, _url: &str, worksheet_id: WorksheetId) -> Result<Vec<Row>> {
        self.rows(worksheet_id)
    }

    async fn get_header_row(&self, _url: &str, worksheet_id: WorksheetId) -> Result<Row> {
        Ok(self.rows(worksheet_id)?.into_iter().next().unwrap_or_default())
    }
}

/// Job store; new jobs start as `Pending`
#[derive(Default)]
pub struct InMemoryRecordStore {
    pub jobs: Mutex<Vec<(JobId, NewImportJob)>>,
    statuses: Mutex<HashMap<JobId, JobStatus>>,
    pub fail_create: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn set_status(&self, job_id: JobId, status: JobStatus) {
        self.statuses.lock().unwrap().insert(job_id, status);
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn last_job(&self) -> Option<(JobId, NewImportJob)> {
        self.jobs.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_import_job(&self, job: &NewImportJob) -> Result<JobId> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(RecordStoreError::QueryFailed("insert failed".to_string()).into());
        }
        let job_id = JobId::generate();
        self.jobs.lock().unwrap().push((job_id, job.clone()));
        self.set_status(job_id, JobStatus::Pending);
        Ok(job_id)
    }

    async fn job_status(&self, job_id: &JobId) -> Result<Option<JobStatus>> {
        Ok(self.statuses.lock().unwrap().get(job_id).copied())
    }
}

#[derive(Default)]
pub struct RecordingQueue {
    pub enqueued: Mutex<Vec<JobId>>,
}

impl RecordingQueue {
    pub fn count(&self) -> usize {
        self.enqueued.lock().unwrap().len()
    }
}

#[async_trait]
impl JobQueue for RecordingQueue {
    async fn enqueue(&self, job_id: &JobId) -> Result<()> {
        self.enqueued.lock().unwrap().push(*job_id);
        Ok(())
    }
}

pub struct FailingQueue;

#[async_trait]
impl JobQueue for FailingQueue {
    async fn enqueue(&self, job_id: &JobId) -> Result<()> {
        Err(RecordStoreError::EnqueueFailed(job_id.to_string()).into())
    }
}

#[derive(Default)]
pub struct InMemoryMappingStore {
    mappings: Mutex<HashMap<String, WorksheetMapping>>,
    pub fail_saves: AtomicBool,
}

impl InMemoryMappingStore {
    pub fn get(&self, name: &str) -> Option<WorksheetMapping> {
        self.mappings.lock().unwrap().get(name).cloned()
    }

    pub fn insert(&self, mapping: WorksheetMapping) {
        self.mappings
            .lock()
            .unwrap()
            .insert(mapping.name.to_string(), mapping);
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn load_mapping(&self, name: &MappingId) -> Result<Option<WorksheetMapping>> {
        Ok(self.get(name.as_str()))
    }

    async fn save_mapping(&self, mapping: &WorksheetMapping) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SyncError::RecordStore(RecordStoreError::QueryFailed(
                "save failed".to_string(),
            )));
        }
        self.insert(mapping.clone());
        Ok(())
    }

    async fn clear_last_import(&self, name: &MappingId) -> Result<bool> {
        match self.mappings.lock().unwrap().get_mut(name.as_str()) {
            Some(mapping) => {
                mapping.last_import = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Payloads kept in memory, referenced by file name
#[derive(Default)]
pub struct MemoryPayloadStore {
    pub files: Mutex<Vec<(String, String)>>,
}

impl MemoryPayloadStore {
    pub fn content(&self, reference: &PayloadRef) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == reference.as_str())
            .map(|(_, content)| content.clone())
    }

    pub fn count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl PayloadStore for MemoryPayloadStore {
    async fn store_payload(&self, file_name: &str, content: &str) -> Result<PayloadRef> {
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), content.to_string()));
        Ok(PayloadRef::new(file_name))
    }
}

/// Every collaborator of an import controller, in memory
pub struct Harness {
    pub sheets: Arc<FakeSheets>,
    pub records: Arc<InMemoryRecordStore>,
    pub queue: Arc<RecordingQueue>,
    pub mappings: Arc<InMemoryMappingStore>,
    pub payloads: Arc<MemoryPayloadStore>,
    pub state: Arc<StateManager>,
}

impl Harness {
    pub fn new() -> Self {
        let mappings = Arc::new(InMemoryMappingStore::default());
        Self {
            sheets: Arc::new(FakeSheets::default()),
            records: Arc::new(InMemoryRecordStore::default()),
            queue: Arc::new(RecordingQueue::default()),
            state: Arc::new(StateManager::new_with_storage(mappings.clone())),
            mappings,
            payloads: Arc::new(MemoryPayloadStore::default()),
        }
    }

    pub fn dispatcher(&self) -> ImportDispatcher {
        ImportDispatcher::new(
            self.payloads.clone(),
            self.records.clone(),
            self.queue.clone(),
        )
    }

    pub fn controller(&self) -> ImportController {
        ImportController::new(
            self.sheets.clone(),
            self.records.clone(),
            self.dispatcher(),
            self.state.clone(),
        )
    }

    pub fn controller_with_queue(&self, queue: Arc<dyn JobQueue + Send + Sync>) -> ImportController {
        ImportController::new(
            self.sheets.clone(),
            self.records.clone(),
            ImportDispatcher::new(self.payloads.clone(), self.records.clone(), queue),
            self.state.clone(),
        )
    }
}
