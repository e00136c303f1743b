//! # MedTrack Core
//!
//! Core business logic for the MedTrack consumable-stock tracker.
//!
//! This crate contains pure data operations and the persistence round-trip:
//! - Inventory repository: validated create/update/delete/query of stock items
//! - Usage ledger: append-only consumption log that decrements stock
//! - Derived metrics: status classification, alert sets, and usage aggregates
//! - Document persistence against a pluggable key-value store
//!
//! **No presentation concerns**: tables, charts, forms, and refresh timing
//! belong to the caller, which reaches the data only through the operations
//! exposed here.
//!
//! ## Durability Model
//!
//! The in-memory document is the single source of truth for the process.
//! Every mutating operation validates its input, applies the change, and
//! persists the whole document synchronously before returning. A failed
//! persist surfaces as an error with the in-memory change left in place —
//! callers should treat the operation as failed and may reload before
//! retrying. Nothing here retries automatically.
//!
//! ## Example Usage
//!
//! ```
//! use medtrack_core::{metrics, CoreConfig, DocumentStore, InventoryFilter, InventoryService};
//! use medtrack_store::MemoryStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CoreConfig::default();
//! let store = DocumentStore::new(Box::new(MemoryStore::new()), &config);
//!
//! // First open seeds the sample document.
//! let service = InventoryService::open(store)?;
//! assert!(!service.items().is_empty());
//!
//! let everything = service.list(&InventoryFilter::default());
//! let low = metrics::low_stock(service.items());
//! assert!(low.len() <= everything.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
mod error;
pub mod input;
mod ledger;
pub mod metrics;
pub mod model;
mod persistence;
mod repository;
mod seed;

pub use config::CoreConfig;
pub use error::{InventoryError, InventoryResult};
pub use input::{ItemInput, UsageInput};
pub use model::{InventoryDocument, InventoryItem, ItemStatus, ParseStatusError, UsageRecord};
pub use persistence::DocumentStore;
pub use repository::{InventoryFilter, InventoryService};
