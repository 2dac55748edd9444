//! Sync run summary and reporting
//!
//! One report per mapping touched by a run, plus totals for the CLI and logs.

use crate::core::import::ImportOutcome;
use crate::domain::ids::{JobId, MappingId, SpreadsheetId};
use crate::domain::SyncError;
use std::time::Duration;

/// Classification of a failed mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorType {
    /// Spreadsheet service unreachable or failing
    Connection,
    /// Record store, queue or payload storage failure
    Storage,
    /// The mapping itself is invalid or blocked
    Validation,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

impl SyncErrorType {
    /// Classify an error
    pub fn of(error: &SyncError) -> Self {
        match error {
            SyncError::Spreadsheet(_) => SyncErrorType::Connection,
            SyncError::RecordStore(_) | SyncError::Storage(_) | SyncError::Io(_) => {
                SyncErrorType::Storage
            }
            SyncError::Validation(_) | SyncError::InvalidArgument(_) => SyncErrorType::Validation,
            SyncError::Configuration(_) => SyncErrorType::Configuration,
            SyncError::Serialization(_) | SyncError::Other(_) => SyncErrorType::Unknown,
        }
    }
}

/// What happened to one mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingStatus {
    /// An import job was dispatched
    Dispatched { job_id: JobId, rows: usize },
    /// No new rows
    UpToDate,
    /// Dry run; nothing dispatched
    DryRun { rows: usize, row_start: u64 },
    /// Import failed
    Failed {
        error_type: SyncErrorType,
        message: String,
    },
    /// Not started because shutdown was requested
    Skipped,
}

impl MappingStatus {
    /// Status from the result of an import trigger
    pub fn from_result(result: &Result<ImportOutcome, SyncError>) -> Self {
        match result {
            Ok(ImportOutcome::Dispatched { job_id, rows }) => MappingStatus::Dispatched {
                job_id: *job_id,
                rows: *rows,
            },
            Ok(ImportOutcome::NothingToImport) => MappingStatus::UpToDate,
            Ok(ImportOutcome::DryRun { rows, row_start }) => MappingStatus::DryRun {
                rows: *rows,
                row_start: *row_start,
            },
            Err(e) => MappingStatus::Failed {
                error_type: SyncErrorType::of(e),
                message: e.to_string(),
            },
        }
    }
}

/// Report for one mapping
#[derive(Debug, Clone)]
pub struct MappingReport {
    /// Parent spreadsheet
    pub spreadsheet: SpreadsheetId,

    /// Mapping name
    pub mapping: MappingId,

    /// Outcome
    pub status: MappingStatus,
}

/// Summary of a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    /// Per-mapping reports, in completion order
    pub reports: Vec<MappingReport>,

    /// Duration of the run
    pub duration: Duration,

    /// Whether shutdown was requested during the run
    pub interrupted: bool,

    /// Number of runs folded into this summary (watch mode)
    pub runs: usize,
}

impl SyncSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            runs: 1,
            ..Default::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a mapping report
    pub fn add_report(&mut self, report: MappingReport) {
        if report.status == MappingStatus::Skipped {
            self.interrupted = true;
        }
        self.reports.push(report);
    }

    /// Fold a later run into this summary
    pub fn absorb(&mut self, other: SyncSummary) {
        self.reports.extend(other.reports);
        self.duration += other.duration;
        self.interrupted |= other.interrupted;
        self.runs += other.runs;
    }

    /// Number of mappings processed
    pub fn mappings_total(&self) -> usize {
        self.reports.len()
    }

    /// Number of dispatched jobs
    pub fn dispatched(&self) -> usize {
        self.count(|s| matches!(s, MappingStatus::Dispatched { .. }))
    }

    /// Data rows carried by dispatched jobs
    pub fn rows_dispatched(&self) -> usize {
        self.reports
            .iter()
            .map(|r| match r.status {
                MappingStatus::Dispatched { rows, .. } => rows,
                _ => 0,
            })
            .sum()
    }

    /// Mappings without new rows
    pub fn up_to_date(&self) -> usize {
        self.count(|s| *s == MappingStatus::UpToDate)
    }

    /// Mappings evaluated in dry-run mode
    pub fn dry_run(&self) -> usize {
        self.count(|s| matches!(s, MappingStatus::DryRun { .. }))
    }

    /// Failed mappings
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, MappingStatus::Failed { .. }))
    }

    /// Failed mappings of one error type
    pub fn failed_with(&self, error_type: SyncErrorType) -> usize {
        self.count(
            |s| matches!(s, MappingStatus::Failed { error_type: t, .. } if *t == error_type),
        )
    }

    /// Mappings skipped by shutdown
    pub fn skipped(&self) -> usize {
        self.count(|s| *s == MappingStatus::Skipped)
    }

    /// Check if the run was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, predicate: impl Fn(&MappingStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| predicate(&r.status)).count()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            mappings = self.mappings_total(),
            dispatched = self.dispatched(),
            rows = self.rows_dispatched(),
            up_to_date = self.up_to_date(),
            dry_run = self.dry_run(),
            failed = self.failed(),
            skipped = self.skipped(),
            duration_ms = self.duration.as_millis() as u64,
            "Sync completed"
        );

        for report in &self.reports {
            if let MappingStatus::Failed {
                error_type,
                message,
            } = &report.status
            {
                tracing::warn!(
                    spreadsheet = %report.spreadsheet,
                    mapping = %report.mapping,
                    error_type = ?error_type,
                    message = %message,
                    "Mapping import failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpreadsheetError;

    fn report(name: &str, status: MappingStatus) -> MappingReport {
        MappingReport {
            spreadsheet: SpreadsheetId::new("orders").unwrap(),
            mapping: MappingId::new(name).unwrap(),
            status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = SyncSummary::new();
        summary.add_report(report(
            "a",
            MappingStatus::Dispatched {
                job_id: JobId::generate(),
                rows: 3,
            },
        ));
        summary.add_report(report(
            "b",
            MappingStatus::Dispatched {
                job_id: JobId::generate(),
                rows: 2,
            },
        ));
        summary.add_report(report("c", MappingStatus::UpToDate));

        assert_eq!(summary.mappings_total(), 3);
        assert_eq!(summary.dispatched(), 2);
        assert_eq!(summary.rows_dispatched(), 5);
        assert_eq!(summary.up_to_date(), 1);
        assert!(summary.is_successful());
        assert!(!summary.interrupted);
    }

    #[test]
    fn test_failure_classification() {
        let blocked: Result<ImportOutcome, SyncError> =
            Err(SyncError::Validation("previous import failed".to_string()));
        let offline: Result<ImportOutcome, SyncError> = Err(SyncError::Spreadsheet(
            SpreadsheetError::Timeout("30s".to_string()),
        ));

        let mut summary = SyncSummary::new();
        summary.add_report(report("a", MappingStatus::from_result(&blocked)));
        summary.add_report(report("b", MappingStatus::from_result(&offline)));

        assert!(!summary.is_successful());
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.failed_with(SyncErrorType::Validation), 1);
        assert_eq!(summary.failed_with(SyncErrorType::Connection), 1);
    }

    #[test]
    fn test_skipped_marks_interrupted() {
        let mut summary = SyncSummary::new();
        summary.add_report(report("a", MappingStatus::Skipped));
        assert!(summary.interrupted);
        assert_eq!(summary.skipped(), 1);
    }

    #[test]
    fn test_absorb() {
        let mut first = SyncSummary::new().with_duration(Duration::from_secs(1));
        first.add_report(report("a", MappingStatus::UpToDate));

        let mut second = SyncSummary::new().with_duration(Duration::from_secs(2));
        second.add_report(report("a", MappingStatus::UpToDate));

        first.absorb(second);
        assert_eq!(first.runs, 2);
        assert_eq!(first.mappings_total(), 2);
        assert_eq!(first.duration, Duration::from_secs(3));
    }
}
