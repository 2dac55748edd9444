//! State manager for mapping checkpoints
//!
//! Wraps a [`MappingStore`] and owns the rules for merging configured
//! mappings with what was persisted by earlier runs.

use crate::adapters::database::traits::MappingStore;
use crate::core::state::mapping::WorksheetMapping;
use crate::domain::ids::MappingId;
use crate::domain::Result;
use std::sync::Arc;

/// State manager for mapping persistence
pub struct StateManager {
    /// Mapping storage backend
    storage: Arc<dyn MappingStore + Send + Sync>,
}

impl StateManager {
    /// Create a new StateManager with a mapping storage backend
    pub fn new_with_storage(storage: Arc<dyn MappingStore + Send + Sync>) -> Self {
        Self { storage }
    }

    /// Load a mapping by name
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(WorksheetMapping))` if found, `Ok(None)` if not found, or an error.
    pub async fn load_mapping(&self, name: &MappingId) -> Result<Option<WorksheetMapping>> {
        self.storage.load_mapping(name).await
    }

    /// Save a mapping
    pub async fn save_mapping(&self, mapping: &WorksheetMapping) -> Result<()> {
        self.storage.save_mapping(mapping).await
    }

    /// Persist a mapping after a dispatched import
    ///
    /// Same as `save_mapping` but logged as a checkpoint.
    pub async fn checkpoint(&self, mapping: &WorksheetMapping) -> Result<()> {
        tracing::info!(
            mapping = %mapping.name,
            counter = mapping.counter,
            last_import = ?mapping.last_import.map(|id| id.to_string()),
            "Checkpointing worksheet mapping"
        );

        self.save_mapping(mapping).await
    }

    /// Resolve the working copy of a configured mapping
    ///
    /// When the store already knows the mapping, its checkpoint is kept and
    /// the configured settings are applied on top. Otherwise the configured
    /// mapping is returned as-is (counter 0, no last import).
    pub async fn resolve_mapping(&self, configured: &WorksheetMapping) -> Result<WorksheetMapping> {
        match self.load_mapping(&configured.name).await? {
            Some(mut stored) => {
                stored.apply_settings(configured);
                Ok(stored)
            }
            None => {
                tracing::debug!(
                    mapping = %configured.name,
                    "No stored state for mapping (first import)"
                );
                Ok(configured.clone())
            }
        }
    }

    /// Release a mapping blocked by a failed import
    ///
    /// # Returns
    ///
    /// `Ok(false)` when the mapping is unknown.
    pub async fn clear_last_import(&self, name: &MappingId) -> Result<bool> {
        let cleared = self.storage.clear_last_import(name).await?;
        if cleared {
            tracing::info!(mapping = %name, "Cleared last import reference");
        }
        Ok(cleared)
    }
}
