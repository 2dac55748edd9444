//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use sheetsync::logging::init_logging;
//! use sheetsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a dispatched import job
///
/// # Example
///
/// ```no_run
/// use sheetsync::log_import_dispatched;
///
/// log_import_dispatched!("orders-0", "5f0c...", "Insert", 12);
/// ```
#[macro_export]
macro_rules! log_import_dispatched {
    ($mapping:expr, $job_id:expr, $kind:expr, $rows:expr) => {
        tracing::info!(
            mapping = %$mapping,
            job_id = %$job_id,
            import_type = %$kind,
            rows = $rows,
            "Import job dispatched"
        );
    };
}

/// Log a mapping held back by a failed import
///
/// # Example
///
/// ```no_run
/// use sheetsync::log_import_blocked;
///
/// log_import_blocked!("orders-0", "5f0c...");
/// ```
#[macro_export]
macro_rules! log_import_blocked {
    ($mapping:expr, $job_id:expr) => {
        tracing::warn!(
            mapping = %$mapping,
            job_id = %$job_id,
            "Import blocked by failed previous import"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use sheetsync::log_error_with_context;
/// use sheetsync::domain::SyncError;
///
/// let error = SyncError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
