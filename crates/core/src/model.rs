//! Inventory document data model.
//!
//! These are the types that make up the persisted document. Field names in
//! the serialized form are camelCase (`expiryDate`, `usageHistory`, ...),
//! matching the historical JSON shape, so documents written by earlier
//! deployments keep loading unchanged.
//!
//! The in-memory document is the single source of truth for the process;
//! mutation happens only through the service operations, never by handing
//! out mutable references to callers.

use chrono::{DateTime, NaiveDate, Utc};
use medtrack_types::NonEmptyText;

/// A trackable stock unit with a quantity and reorder threshold.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique positive identifier, assigned by the repository and immutable
    /// after creation.
    pub id: u32,
    pub name: NonEmptyText,
    pub category: NonEmptyText,
    /// Current stock level. Decremented only by recording usage, which
    /// rejects any decrement that would underflow.
    pub quantity: u32,
    /// Reorder trigger point.
    pub threshold: u32,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: String,
    /// Absent means the item does not expire.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Average units consumed per day; feeds the depletion forecast.
    #[serde(default)]
    pub usage_rate: f64,
}

/// An immutable log entry representing consumption of an item.
///
/// Records reference their item by id at creation time. Deleting an item does
/// not cascade, so a record can outlive its item; `item_name` keeps the
/// historical name readable either way.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Unique positive identifier, allocated monotonically.
    pub id: u32,
    pub item_id: u32,
    /// Snapshot of the item's name at record time; not updated on rename.
    pub item_name: NonEmptyText,
    pub quantity: u32,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub prescriber: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

/// The whole persisted document: inventory plus append-only usage history.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDocument {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub usage_history: Vec<UsageRecord>,
}

/// Derived stock classification for an item.
///
/// Ordered by severity, so `Critical > Warning > Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemStatus {
    Good,
    Warning,
    Critical,
}

impl ItemStatus {
    /// The lowercase identifier used at the presentation boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Good => "good",
            ItemStatus::Warning => "warning",
            ItemStatus::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status identifier.
#[derive(Debug, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(String);

impl std::str::FromStr for ItemStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "good" => Ok(ItemStatus::Good),
            "warning" => Ok(ItemStatus::Warning),
            "critical" => Ok(ItemStatus::Critical),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_round_trips_with_camel_case_fields() {
        let raw = r#"{
            "inventory": [
                {
                    "id": 1,
                    "name": "Paracetamol 500mg",
                    "category": "Medication",
                    "quantity": 150,
                    "threshold": 50,
                    "supplier": "Pharma Inc.",
                    "expiryDate": "2025-12-31",
                    "location": "Shelf A1",
                    "usageRate": 10.0
                }
            ],
            "usageHistory": [
                {
                    "id": 1,
                    "itemId": 1,
                    "itemName": "Paracetamol 500mg",
                    "quantity": 30,
                    "patientId": "PT12345",
                    "prescriber": "Dr. Smith",
                    "notes": null,
                    "date": "2025-06-01T09:30:00Z"
                }
            ]
        }"#;

        let document: InventoryDocument =
            serde_json::from_str(raw).expect("historical document should deserialize");
        assert_eq!(document.inventory.len(), 1);
        assert_eq!(document.usage_history.len(), 1);
        assert_eq!(
            document.inventory[0].expiry_date,
            Some(NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date"))
        );

        let serialized = serde_json::to_string(&document).expect("should serialize");
        assert!(serialized.contains("\"usageHistory\""), "keys must stay camelCase");
        assert!(serialized.contains("\"expiryDate\""));

        let reparsed: InventoryDocument =
            serde_json::from_str(&serialized).expect("round trip should deserialize");
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let raw = r#"{
            "inventory": [
                {
                    "id": 2,
                    "name": "Medical Gloves",
                    "category": "PPE",
                    "quantity": 200,
                    "threshold": 100
                }
            ]
        }"#;

        let document: InventoryDocument =
            serde_json::from_str(raw).expect("sparse document should deserialize");
        let item = &document.inventory[0];
        assert_eq!(item.supplier, "");
        assert_eq!(item.location, "");
        assert_eq!(item.expiry_date, None);
        assert_eq!(item.usage_rate, 0.0);
        assert!(document.usage_history.is_empty());
    }

    #[test]
    fn test_status_parses_and_displays_lowercase() {
        for status in [ItemStatus::Good, ItemStatus::Warning, ItemStatus::Critical] {
            let parsed: ItemStatus = status.to_string().parse().expect("should parse back");
            assert_eq!(parsed, status);
        }
        assert!("adequate".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_status_orders_by_severity() {
        assert!(ItemStatus::Critical > ItemStatus::Warning);
        assert!(ItemStatus::Warning > ItemStatus::Good);
    }
}
