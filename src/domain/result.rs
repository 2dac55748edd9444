//! Result type alias for Sheetsync

use super::errors::SyncError;

/// Result type alias for Sheetsync operations
///
/// # Examples
///
/// ```
/// use sheetsync::domain::result::Result;
/// use sheetsync::domain::errors::SyncError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SyncError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SyncError>;
