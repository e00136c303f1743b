//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide state during operation handling, which keeps services
//! deterministic and easy to exercise in test harnesses.

use crate::constants::STORAGE_KEY;
use crate::{InventoryError, InventoryResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    storage_key: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with an explicit storage key.
    pub fn new(storage_key: impl Into<String>) -> InventoryResult<Self> {
        let storage_key = storage_key.into();
        if storage_key.trim().is_empty() {
            return Err(InventoryError::Validation(
                "storage_key cannot be empty".into(),
            ));
        }

        Ok(Self { storage_key })
    }

    /// The key under which the document is stored.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_fixed_storage_key() {
        assert_eq!(CoreConfig::default().storage_key(), STORAGE_KEY);
    }

    #[test]
    fn test_new_rejects_blank_key() {
        let err = CoreConfig::new("   ").expect_err("blank key should fail");
        assert!(matches!(err, InventoryError::Validation(_)));
    }
}
