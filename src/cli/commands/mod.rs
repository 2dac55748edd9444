//! CLI command implementations
//!
//! Exit codes: 0 success, 1 partial failure, 2 configuration error,
//! 4 connection error, 5 fatal error, 130 interrupted.

pub mod clear;
pub mod init;
pub mod status;
pub mod sync;
pub mod update;
pub mod validate;

use crate::domain::SyncError;

/// Exit code for an error that aborted a command
pub(crate) fn exit_code_for(error: &SyncError) -> i32 {
    match error {
        SyncError::Configuration(_) | SyncError::InvalidArgument(_) => 2,
        SyncError::Spreadsheet(_) | SyncError::RecordStore(_) => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordStoreError;

    #[test]
    fn test_exit_code_for() {
        assert_eq!(exit_code_for(&SyncError::Configuration("x".to_string())), 2);
        assert_eq!(
            exit_code_for(&SyncError::RecordStore(RecordStoreError::ConnectionFailed(
                "refused".to_string()
            ))),
            4
        );
        assert_eq!(exit_code_for(&SyncError::Validation("x".to_string())), 5);
    }
}
