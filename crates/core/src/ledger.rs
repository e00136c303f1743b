//! Usage ledger operations.
//!
//! The usage history is an append-only log: recording consumption validates
//! the draft, decrements the item's stock, appends a dated entry carrying a
//! snapshot of the item's name, and persists the document. There is no
//! delete — history outlives the items it references.

use crate::input::{self, UsageInput};
use crate::model::UsageRecord;
use crate::repository::InventoryService;
use crate::{InventoryError, InventoryResult};

impl InventoryService {
    /// Returns the usage history in recording order.
    pub fn usage_history(&self) -> &[UsageRecord] {
        &self.document().usage_history
    }

    /// Returns the usage records for one item, most recent first.
    pub fn item_history(&self, item_id: u32) -> Vec<&UsageRecord> {
        let mut records: Vec<&UsageRecord> = self
            .document()
            .usage_history
            .iter()
            .filter(|record| record.item_id == item_id)
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Records consumption of an item and persists the document.
    ///
    /// All fields are validated before anything is touched, then the item's
    /// quantity is decremented and a ledger entry appended, denormalizing
    /// the item's current name. Returns the new record's id.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Validation` if `item_id`, `quantity`, or
    /// `date` is missing or malformed; `InventoryError::ItemNotFound` if the
    /// item does not exist; `InventoryError::InsufficientStock` if the
    /// requested quantity exceeds current stock (the item is left
    /// unchanged); `InventoryError::Store` if persisting fails.
    pub fn record(&mut self, usage_data: UsageInput) -> InventoryResult<u32> {
        let item_id = input::parse_positive_u32("itemId", usage_data.item_id.as_deref())?;
        let quantity = input::parse_positive_u32("quantity", usage_data.quantity.as_deref())?;
        let date = input::parse_timestamp("date", usage_data.date.as_deref())?;
        let patient_id = input::normalise_optional_text(usage_data.patient_id);
        let prescriber = input::normalise_optional_text(usage_data.prescriber);
        let notes = input::normalise_optional_text(usage_data.notes);

        let document = self.document_mut();
        let item = document
            .inventory
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(InventoryError::ItemNotFound(item_id))?;

        if quantity > item.quantity {
            return Err(InventoryError::InsufficientStock {
                id: item_id,
                requested: quantity,
                available: item.quantity,
            });
        }

        item.quantity -= quantity;
        let item_name = item.name.clone();

        let id = document
            .usage_history
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(1, |max| max + 1);

        document.usage_history.push(UsageRecord {
            id,
            item_id,
            item_name,
            quantity,
            patient_id,
            prescriber,
            notes,
            date,
        });

        self.persist()?;
        Ok(id)
    }
}
