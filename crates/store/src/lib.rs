//! MedTrack Key-Value Storage
//!
//! This crate provides the persistence backends for the MedTrack inventory
//! core. The core serializes its whole document to a single string and stores
//! it under a fixed key; this crate owns how that key/value pair is kept.
//!
//! ## Design Principles
//!
//! - A store is a plain get/set surface: writes replace the previous value
//!   wholesale, there is no merge, transaction, or retry layer
//! - Keys are restricted to a conservative character set so they can double
//!   as filenames without escaping
//! - Backends validate their configuration eagerly at construction time and
//!   perform no other I/O until asked
//!
//! ## Backends
//!
//! - [`FileStore`] keeps each key as one file under a root directory
//! - [`MemoryStore`] keeps values in memory; handles share state when cloned,
//!   which makes it convenient for tests and embedding
//!
//! ## Example Usage
//!
//! ```
//! use medtrack_store::{KeyValueStore, MemoryStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! store.set("medtrack-data", "{}".to_owned())?;
//! assert_eq!(store.get("medtrack-data")?.as_deref(), Some("{}"));
//! # Ok(())
//! # }
//! ```

mod constants;
mod store;

pub use constants::STORE_FILE_EXTENSION;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Root directory does not exist or is not a directory
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// Key is empty, too long, or contains characters unsafe for a filename
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// In-memory store lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,
}
