//! Local directory payload store

use super::PayloadStore;
use crate::domain::import_job::PayloadRef;
use crate::domain::{Result, SyncError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Stores payloads as files in a local directory
///
/// The payload reference is the absolute path of the written file.
pub struct LocalPayloadStore {
    root: PathBuf,
}

impl LocalPayloadStore {
    /// Create a store rooted at `root`
    ///
    /// The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the payloads are written to
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Replace path separators so a display name cannot escape the payload directory
fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}

#[async_trait]
impl PayloadStore for LocalPayloadStore {
    async fn store_payload(&self, file_name: &str, content: &str) -> Result<PayloadRef> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            SyncError::Storage(format!(
                "Failed to create payload directory {}: {e}",
                self.root.display()
            ))
        })?;

        let path = self.root.join(sanitize_file_name(file_name));
        tokio::fs::write(&path, content.as_bytes())
            .await
            .map_err(|e| {
                SyncError::Storage(format!("Failed to write payload {}: {e}", path.display()))
            })?;

        tracing::debug!(
            path = %path.display(),
            bytes = content.len(),
            "Payload stored"
        );

        Ok(PayloadRef::new(path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_payload_writes_file() {
        let dir = TempDir::new().unwrap();
        let store = LocalPayloadStore::new(dir.path().join("payloads"));

        let reference = store
            .store_payload("Orders-worksheet-0-abc.csv", "Name\nAlice\n")
            .await
            .unwrap();

        let written = std::fs::read_to_string(reference.as_str()).unwrap();
        assert_eq!(written, "Name\nAlice\n");
        assert!(reference.as_str().ends_with("Orders-worksheet-0-abc.csv"));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("a/b\\c.csv"), "a_b_c.csv");
        assert_eq!(sanitize_file_name("Test Sheet.csv"), "Test Sheet.csv");
    }
}
