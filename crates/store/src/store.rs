//! Key-value store trait and backend implementations
//!
//! The inventory core treats durable storage as a single get/set surface,
//! mirroring the browser origin of the document format (one value under one
//! key). This module defines that surface and its two backends.
//!
//! # Key Safety
//!
//! Keys are used verbatim as file stems by [`FileStore`], so they are
//! restricted to a conservative ASCII set before any path is built:
//!
//! - non-empty after trimming
//! - at most 253 characters
//! - alphanumeric plus `.`, `-`, `_`
//!
//! This rules out separators and parent-directory components, so a key can
//! never escape the store's root directory.

use crate::{StoreError, STORE_FILE_EXTENSION};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Maximum accepted key length, matching common filename limits.
const MAX_KEY_LEN: usize = 253;

/// A durable (or test-scoped) string store addressed by key.
///
/// Implementations replace the previous value wholesale on `set`; there is no
/// partial or merge write. A missing key is not an error — `get` returns
/// `Ok(None)`.
pub trait KeyValueStore: std::fmt::Debug {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the key is invalid or the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the key is invalid or the backend fails.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Validates that a key is safe to embed in a filename.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey("key cannot be empty".into()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey(format!(
            "key exceeds maximum length of {} characters",
            MAX_KEY_LEN
        )));
    }

    let ok = key
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(StoreError::InvalidKey(
            "key contains invalid characters (only alphanumeric, '.', '-', '_' allowed)".into(),
        ));
    }

    Ok(())
}

/// Directory-backed store: one file per key.
///
/// Each key `k` is stored as `<root>/<k>.json`. The root directory must exist
/// before construction; the store never creates or removes directories.
#[derive(Debug)]
pub struct FileStore {
    /// Root directory holding one file per key
    root_directory: PathBuf,
}

impl FileStore {
    /// Creates a new `FileStore` rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRootDirectory` if the path does not exist,
    /// is not a directory, or cannot be canonicalised.
    pub fn new(root_directory: &Path) -> Result<Self, StoreError> {
        if !root_directory.exists() {
            return Err(StoreError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                root_directory.display()
            )));
        }

        if !root_directory.is_dir() {
            return Err(StoreError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                root_directory.display()
            )));
        }

        let root_directory = root_directory.canonicalize().map_err(|e| {
            StoreError::InvalidRootDirectory(format!(
                "Failed to canonicalise {}: {}",
                root_directory.display(),
                e
            ))
        })?;

        Ok(Self { root_directory })
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        // Appended rather than set_extension, so a dot inside the key cannot
        // change which file the key maps to.
        Ok(self
            .root_directory
            .join(format!("{}.{}", key, STORE_FILE_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        fs::write(&path, value)?;
        Ok(())
    }
}

/// In-memory store backed by a shared map.
///
/// Cloning a `MemoryStore` yields a handle onto the same underlying map, so a
/// test can hand one handle to the core and inspect writes through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_owned(), value);
        Ok(())
    }
}
