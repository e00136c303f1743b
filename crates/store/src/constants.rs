//! Constants used by the storage backends.

/// File extension for values persisted by the file-backed store.
pub const STORE_FILE_EXTENSION: &str = "json";
