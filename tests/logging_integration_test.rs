//! Integration tests for logging functionality
//!
//! A global subscriber can only be installed once per process, so the
//! successful initialization lives in a single test.

use sheetsync::config::LoggingConfig;
use sheetsync::domain::SyncError;
use sheetsync::logging::init_logging;
use sheetsync::{log_error_with_context, log_import_blocked, log_import_dispatched};
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_log_level_rejected() {
    let err = init_logging("verbose", &LoggingConfig::default()).unwrap_err();
    assert!(matches!(err, SyncError::Configuration(_)));
}

#[test]
fn test_file_logging_initialization() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    std::env::remove_var("RUST_LOG");
    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.exists());

    log_import_dispatched!("orders-0", "job-1", "Insert", 3);
    log_import_blocked!("orders-0", "job-1");
    log_error_with_context!(
        SyncError::Validation("no identifier column".to_string()),
        "Import of mapping orders-0 failed"
    );
    drop(guard);

    let log_file = log_path.join("sheetsync.log");
    let contents = std::fs::read_to_string(log_file).unwrap();
    // The filter admits the library's own target
    assert!(contents.contains("Logging initialized"));
    assert!(contents.contains("\"local_enabled\":true"));

    // A second global subscriber is refused
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}
