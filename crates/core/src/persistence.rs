//! Persistence adapter for the inventory document.
//!
//! The document travels as one JSON value under one fixed key. This module
//! owns the serialization round-trip and the first-run seeding; which store
//! backs the key is the caller's choice via [`KeyValueStore`].

use crate::config::CoreConfig;
use crate::model::InventoryDocument;
use crate::seed;
use crate::{InventoryError, InventoryResult};
use chrono::Utc;
use medtrack_store::KeyValueStore;
use std::fmt;

/// Loads and saves the whole inventory document against a key-value store.
///
/// Writes are wholesale: `save` replaces whatever was stored before, with no
/// partial or merge write. The adapter keeps no cache; every `load` reads the
/// backing store.
pub struct DocumentStore {
    store: Box<dyn KeyValueStore>,
    storage_key: String,
}

impl DocumentStore {
    /// Creates a new adapter over the given store.
    pub fn new(store: Box<dyn KeyValueStore>, config: &CoreConfig) -> Self {
        Self {
            store,
            storage_key: config.storage_key().to_owned(),
        }
    }

    /// Reads the stored document.
    ///
    /// If no document exists under the key yet, seeds the sample document and
    /// writes it back before returning it.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Store` if the backing store fails, or
    /// `InventoryError::Deserialization` if the stored content is malformed.
    pub fn load(&self) -> InventoryResult<InventoryDocument> {
        match self.store.get(&self.storage_key)? {
            Some(raw) => {
                let document =
                    serde_json::from_str(&raw).map_err(InventoryError::Deserialization)?;
                tracing::debug!(key = %self.storage_key, "document loaded");
                Ok(document)
            }
            None => {
                tracing::info!(
                    key = %self.storage_key,
                    "no stored document found, initialising sample data"
                );
                let document = seed::sample_document(Utc::now())?;
                self.save(&document)?;
                Ok(document)
            }
        }
    }

    /// Serializes and writes the whole document.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Serialization` if encoding fails, or
    /// `InventoryError::Store` if the write fails. On a failed write the
    /// caller's in-memory document is ahead of durable state; no rollback is
    /// attempted here.
    pub fn save(&self, document: &InventoryDocument) -> InventoryResult<()> {
        let raw = serde_json::to_string(document).map_err(InventoryError::Serialization)?;
        self.store.set(&self.storage_key, raw)?;
        tracing::debug!(key = %self.storage_key, "document persisted");
        Ok(())
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}
