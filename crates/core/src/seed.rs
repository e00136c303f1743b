//! First-run sample data.
//!
//! When no document exists under the storage key yet, the persistence
//! adapter seeds this document so a fresh deployment starts with something
//! to show. The values are the historical sample set.

use crate::model::{InventoryDocument, InventoryItem, UsageRecord};
use crate::{InventoryError, InventoryResult};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use medtrack_types::NonEmptyText;

fn text(value: &str) -> InventoryResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|e| InventoryError::Validation(e.to_string()))
}

fn date(value: &str) -> InventoryResult<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| InventoryError::Validation(e.to_string()))
}

/// Builds the sample document used to initialise an empty store.
///
/// `now` anchors the sample usage records (one today, one yesterday) so the
/// dashboard metrics have data in range on first run.
pub(crate) fn sample_document(now: DateTime<Utc>) -> InventoryResult<InventoryDocument> {
    let inventory = vec![
        InventoryItem {
            id: 1,
            name: text("Paracetamol 500mg")?,
            category: text("Medication")?,
            quantity: 150,
            threshold: 50,
            supplier: "Pharma Inc.".to_owned(),
            expiry_date: Some(date("2025-12-31")?),
            location: "Shelf A1".to_owned(),
            usage_rate: 10.0,
        },
        InventoryItem {
            id: 2,
            name: text("Medical Gloves")?,
            category: text("PPE")?,
            quantity: 200,
            threshold: 100,
            supplier: "Safety Supplies".to_owned(),
            expiry_date: None,
            location: "Storage B".to_owned(),
            usage_rate: 15.0,
        },
        InventoryItem {
            id: 3,
            name: text("Bandages")?,
            category: text("Supplies")?,
            quantity: 120,
            threshold: 40,
            supplier: "MediCorp".to_owned(),
            expiry_date: Some(date("2025-01-15")?),
            location: "Shelf C1".to_owned(),
            usage_rate: 8.0,
        },
        InventoryItem {
            id: 4,
            name: text("Antiseptic Solution")?,
            category: text("Medication")?,
            quantity: 45,
            threshold: 20,
            supplier: "Pharma Inc.".to_owned(),
            expiry_date: Some(date("2025-09-15")?),
            location: "Shelf A3".to_owned(),
            usage_rate: 3.0,
        },
    ];

    let usage_history = vec![
        UsageRecord {
            id: 1,
            item_id: 1,
            item_name: text("Paracetamol 500mg")?,
            quantity: 30,
            patient_id: Some("PT12345".to_owned()),
            prescriber: Some("Dr. Smith".to_owned()),
            notes: Some("Prescribed for fever".to_owned()),
            date: now,
        },
        UsageRecord {
            id: 2,
            item_id: 2,
            item_name: text("Medical Gloves")?,
            quantity: 5,
            patient_id: None,
            prescriber: Some("Nurse Williams".to_owned()),
            notes: Some("Procedure room restock".to_owned()),
            date: now - Duration::days(1),
        },
    ];

    Ok(InventoryDocument {
        inventory,
        usage_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_document_shape() {
        let now = Utc::now();
        let document = sample_document(now).expect("sample data should build");

        assert_eq!(document.inventory.len(), 4);
        assert_eq!(document.usage_history.len(), 2);
        assert_eq!(document.usage_history[0].date, now);
        assert_eq!(document.usage_history[1].date, now - Duration::days(1));

        // Ids must already follow the allocator's scheme.
        let max_item_id = document.inventory.iter().map(|i| i.id).max();
        assert_eq!(max_item_id, Some(4));
    }
}
