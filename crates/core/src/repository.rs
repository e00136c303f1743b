//! Inventory repository operations.
//!
//! [`InventoryService`] owns the in-memory document and the persistence
//! adapter. Every mutating operation validates its input, applies the change
//! in memory, and persists the whole document before returning; queries hand
//! out snapshots or shared references, never mutable access to the document.
//!
//! Item ids are allocated as `max(existing) + 1` (1 for an empty inventory)
//! and are immutable once assigned.

use crate::input::{self, ItemInput};
use crate::metrics;
use crate::model::{InventoryDocument, InventoryItem, ItemStatus};
use crate::persistence::DocumentStore;
use crate::{InventoryError, InventoryResult};

/// Optional filters for [`InventoryService::list`].
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Computed status match.
    pub status: Option<ItemStatus>,
}

/// Owns the inventory document and mediates all mutations.
///
/// Constructed once per process lifetime and passed to the call sites that
/// need it; the derived-metric functions take snapshots from [`items`] and
/// [`usage_history`] explicitly rather than reading shared state.
///
/// [`items`]: InventoryService::items
/// [`usage_history`]: InventoryService::usage_history
#[derive(Debug)]
pub struct InventoryService {
    document: InventoryDocument,
    store: DocumentStore,
}

impl InventoryService {
    /// Opens the service by loading (or seeding) the stored document.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError` if the initial load fails.
    pub fn open(store: DocumentStore) -> InventoryResult<Self> {
        let document = store.load()?;
        Ok(Self { document, store })
    }

    /// Returns the current items in insertion order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.document.inventory
    }

    /// Returns a snapshot copy of the items matching `filter`.
    ///
    /// Insertion order is preserved; no further ordering is applied.
    pub fn list(&self, filter: &InventoryFilter) -> Vec<InventoryItem> {
        self.document
            .inventory
            .iter()
            .filter(|item| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |category| item.category.as_str() == category)
            })
            .filter(|item| {
                filter
                    .status
                    .map_or(true, |status| metrics::status_of(item) == status)
            })
            .cloned()
            .collect()
    }

    /// Looks up an item by id.
    ///
    /// A missing id is not an error at this level; it is logged and `None` is
    /// returned so callers can decide how to surface it.
    pub fn get(&self, id: u32) -> Option<&InventoryItem> {
        let item = self.document.inventory.iter().find(|item| item.id == id);
        if item.is_none() {
            tracing::warn!(id, "item not found");
        }
        item
    }

    /// Creates or updates an item from form input and persists the document.
    ///
    /// With a blank id a new item is created under a freshly allocated id.
    /// With an id, the provided fields are merged over the stored item:
    /// absent optional fields keep their stored values, and an absent
    /// `usage_rate` preserves the stored rate (an explicit `"0"` overrides
    /// it).
    ///
    /// Returns the id of the created or updated item.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Validation` if `name` or `category` is
    /// blank, if `quantity`/`threshold` do not parse as numbers, or if any
    /// provided optional field is malformed; `InventoryError::ItemNotFound`
    /// if an id is given but no item has it; `InventoryError::Store` if
    /// persisting fails (the in-memory mutation is kept — see the crate
    /// docs on durability).
    pub fn upsert(&mut self, item_data: ItemInput) -> InventoryResult<u32> {
        // Coerce everything up front so a late parse failure cannot leave a
        // half-applied update behind.
        let id = input::parse_item_id(item_data.id.as_deref())?;
        let name = input::parse_required_text("name", item_data.name.as_deref())?;
        let category = input::parse_required_text("category", item_data.category.as_deref())?;
        let quantity = input::parse_required_u32("quantity", item_data.quantity.as_deref())?;
        let threshold = input::parse_required_u32("threshold", item_data.threshold.as_deref())?;
        let supplier = item_data.supplier.map(|v| v.trim().to_owned());
        let location = item_data.location.map(|v| v.trim().to_owned());
        let expiry_date = match item_data.expiry_date.as_deref() {
            Some(raw) => Some(input::parse_expiry(raw)?),
            None => None,
        };
        let usage_rate = match item_data.usage_rate.as_deref() {
            Some(raw) => Some(input::parse_usage_rate(raw)?),
            None => None,
        };

        let id = match id {
            Some(id) => {
                let item = self
                    .document
                    .inventory
                    .iter_mut()
                    .find(|item| item.id == id)
                    .ok_or(InventoryError::ItemNotFound(id))?;

                item.name = name;
                item.category = category;
                item.quantity = quantity;
                item.threshold = threshold;
                if let Some(supplier) = supplier {
                    item.supplier = supplier;
                }
                if let Some(location) = location {
                    item.location = location;
                }
                if let Some(expiry_date) = expiry_date {
                    item.expiry_date = expiry_date;
                }
                if let Some(usage_rate) = usage_rate {
                    item.usage_rate = usage_rate;
                }
                id
            }
            None => {
                let id = self.next_item_id();
                self.document.inventory.push(InventoryItem {
                    id,
                    name,
                    category,
                    quantity,
                    threshold,
                    supplier: supplier.unwrap_or_default(),
                    location: location.unwrap_or_default(),
                    expiry_date: expiry_date.unwrap_or(None),
                    usage_rate: usage_rate.unwrap_or(0.0),
                });
                id
            }
        };

        self.store.save(&self.document)?;
        Ok(id)
    }

    /// Deletes the item with the given id and persists the document.
    ///
    /// Usage records referencing the item are kept; history is append-only
    /// and a record may outlive its item.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::ItemNotFound` if no item has the id, or
    /// `InventoryError::Store` if persisting fails.
    pub fn remove(&mut self, id: u32) -> InventoryResult<()> {
        let before = self.document.inventory.len();
        self.document.inventory.retain(|item| item.id != id);
        if self.document.inventory.len() == before {
            return Err(InventoryError::ItemNotFound(id));
        }

        self.store.save(&self.document)?;
        Ok(())
    }

    pub(crate) fn document(&self) -> &InventoryDocument {
        &self.document
    }

    pub(crate) fn document_mut(&mut self) -> &mut InventoryDocument {
        &mut self.document
    }

    pub(crate) fn persist(&self) -> InventoryResult<()> {
        self.store.save(&self.document)
    }

    fn next_item_id(&self) -> u32 {
        self.document
            .inventory
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::constants::STORAGE_KEY;
    use medtrack_store::{KeyValueStore, MemoryStore};

    fn service_with(document: &str) -> (InventoryService, MemoryStore) {
        let store = MemoryStore::new();
        store
            .set(STORAGE_KEY, document.to_owned())
            .expect("priming the store should succeed");
        let adapter = DocumentStore::new(Box::new(store.clone()), &CoreConfig::default());
        let service = InventoryService::open(adapter).expect("open should succeed");
        (service, store)
    }

    fn empty_service() -> (InventoryService, MemoryStore) {
        service_with(r#"{"inventory":[],"usageHistory":[]}"#)
    }

    fn new_item(name: &str, quantity: &str, threshold: &str) -> ItemInput {
        ItemInput {
            name: Some(name.to_owned()),
            category: Some("Medication".to_owned()),
            quantity: Some(quantity.to_owned()),
            threshold: Some(threshold.to_owned()),
            ..ItemInput::default()
        }
    }

    #[test]
    fn test_upsert_allocates_sequential_ids() {
        let (mut service, _) = empty_service();

        let first = service
            .upsert(new_item("Paracetamol 500mg", "150", "50"))
            .expect("insert should succeed");
        assert_eq!(first, 1, "empty inventory starts at id 1");

        let second = service
            .upsert(new_item("Bandages", "120", "40"))
            .expect("insert should succeed");
        assert_eq!(second, 2, "next id is max + 1");
        assert_ne!(first, second, "ids are never reused across inserts");
    }

    #[test]
    fn test_upsert_with_blank_id_creates_a_new_item() {
        let (mut service, _) = empty_service();

        let mut input = new_item("Medical Gloves", "200", "100");
        input.id = Some("  ".to_owned());
        let id = service.upsert(input).expect("blank id means create");
        assert_eq!(id, 1);
        assert_eq!(service.items().len(), 1);
    }

    #[test]
    fn test_upsert_validates_required_fields() {
        let (mut service, _) = empty_service();

        let mut missing_name = new_item("x", "10", "5");
        missing_name.name = Some("   ".to_owned());
        let err = service.upsert(missing_name).expect_err("blank name should fail");
        assert!(matches!(err, InventoryError::Validation(_)));

        let mut bad_quantity = new_item("Bandages", "plenty", "5");
        bad_quantity.quantity = Some("plenty".to_owned());
        let err = service
            .upsert(bad_quantity)
            .expect_err("non-numeric quantity should fail");
        assert!(matches!(err, InventoryError::Validation(_)));

        assert!(service.items().is_empty(), "failed upserts must not mutate");
    }

    #[test]
    fn test_upsert_update_merges_over_existing_item() {
        let (mut service, _) = empty_service();

        let mut create = new_item("Antiseptic Solution", "45", "20");
        create.supplier = Some("Pharma Inc.".to_owned());
        create.usage_rate = Some("3".to_owned());
        let id = service.upsert(create).expect("insert should succeed");

        // Update quantity only; supplier and usage rate are not provided.
        let mut update = new_item("Antiseptic Solution", "40", "20");
        update.id = Some(id.to_string());
        let updated = service.upsert(update).expect("update should succeed");
        assert_eq!(updated, id, "id is immutable across updates");

        let item = service.get(id).expect("item should exist");
        assert_eq!(item.quantity, 40);
        assert_eq!(item.supplier, "Pharma Inc.", "absent field keeps stored value");
        assert_eq!(item.usage_rate, 3.0, "absent usage rate is preserved");
    }

    #[test]
    fn test_upsert_explicit_zero_usage_rate_overrides() {
        let (mut service, _) = empty_service();

        let mut create = new_item("Paracetamol 500mg", "150", "50");
        create.usage_rate = Some("10".to_owned());
        let id = service.upsert(create).expect("insert should succeed");

        let mut update = new_item("Paracetamol 500mg", "150", "50");
        update.id = Some(id.to_string());
        update.usage_rate = Some("0".to_owned());
        service.upsert(update).expect("update should succeed");

        let item = service.get(id).expect("item should exist");
        assert_eq!(item.usage_rate, 0.0, "an explicit zero is an override, not unset");
    }

    #[test]
    fn test_upsert_blank_expiry_clears_stored_date() {
        let (mut service, _) = empty_service();

        let mut create = new_item("Bandages", "120", "40");
        create.expiry_date = Some("2025-01-15".to_owned());
        let id = service.upsert(create).expect("insert should succeed");
        assert!(service.get(id).expect("item").expiry_date.is_some());

        let mut update = new_item("Bandages", "120", "40");
        update.id = Some(id.to_string());
        update.expiry_date = Some("".to_owned());
        service.upsert(update).expect("update should succeed");
        assert_eq!(service.get(id).expect("item").expiry_date, None);
    }

    #[test]
    fn test_upsert_unknown_id_fails_without_mutation() {
        let (mut service, _) = empty_service();

        let mut input = new_item("Ghost", "10", "5");
        input.id = Some("42".to_owned());
        let err = service.upsert(input).expect_err("unknown id should fail");
        assert!(matches!(err, InventoryError::ItemNotFound(42)));
        assert!(service.items().is_empty());
    }

    #[test]
    fn test_remove_missing_id_leaves_inventory_unchanged() {
        let (mut service, _) = empty_service();
        service
            .upsert(new_item("Medical Gloves", "200", "100"))
            .expect("insert should succeed");

        let err = service.remove(99).expect_err("missing id should fail");
        assert!(matches!(err, InventoryError::ItemNotFound(99)));
        assert_eq!(service.items().len(), 1);
    }

    #[test]
    fn test_remove_persists_the_deletion() {
        let (mut service, store) = empty_service();
        let id = service
            .upsert(new_item("Medical Gloves", "200", "100"))
            .expect("insert should succeed");

        service.remove(id).expect("remove should succeed");

        let raw = store
            .get(STORAGE_KEY)
            .expect("get should succeed")
            .expect("document should be stored");
        let document: InventoryDocument =
            serde_json::from_str(&raw).expect("stored document should parse");
        assert!(document.inventory.is_empty(), "deletion must be durable");
    }

    #[test]
    fn test_list_filters_by_category_and_status() {
        let (mut service, _) = empty_service();

        let mut gloves = new_item("Medical Gloves", "200", "100");
        gloves.category = Some("PPE".to_owned());
        service.upsert(gloves).expect("insert should succeed");
        service
            .upsert(new_item("Paracetamol 500mg", "30", "50"))
            .expect("insert should succeed");

        let ppe = service.list(&InventoryFilter {
            category: Some("PPE".to_owned()),
            status: None,
        });
        assert_eq!(ppe.len(), 1);
        assert_eq!(ppe[0].name.as_str(), "Medical Gloves");

        let critical = service.list(&InventoryFilter {
            category: None,
            status: Some(ItemStatus::Critical),
        });
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].name.as_str(), "Paracetamol 500mg");
    }

    #[test]
    fn test_list_is_idempotent_and_returns_a_snapshot() {
        let (mut service, _) = empty_service();
        service
            .upsert(new_item("Bandages", "120", "40"))
            .expect("insert should succeed");

        let filter = InventoryFilter::default();
        let first = service.list(&filter);
        let second = service.list(&filter);
        assert_eq!(first, second, "list without mutation must be stable");

        // Mutating the snapshot must not touch the service's document.
        let mut snapshot = service.list(&filter);
        snapshot[0].quantity = 0;
        assert_eq!(service.items()[0].quantity, 120);
    }

    #[test]
    fn test_get_missing_id_returns_none() {
        let (service, _) = empty_service();
        assert!(service.get(7).is_none());
    }

    #[test]
    fn test_open_seeds_an_empty_store() {
        let store = MemoryStore::new();
        let adapter = DocumentStore::new(Box::new(store.clone()), &CoreConfig::default());
        let service = InventoryService::open(adapter).expect("open should seed");

        assert_eq!(service.items().len(), 4);
        assert_eq!(service.usage_history().len(), 2);
        assert!(
            store
                .get(STORAGE_KEY)
                .expect("get should succeed")
                .is_some(),
            "seed must be written back"
        );
    }
}
