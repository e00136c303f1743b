use medtrack_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("item with id {0} not found")]
    ItemNotFound(u32),
    #[error(
        "insufficient stock for item {id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        id: u32,
        requested: u32,
        available: u32,
    },
    #[error("failed to access the document store: {0}")]
    Store(#[from] StoreError),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize document: {0}")]
    Deserialization(serde_json::Error),
}

pub type InventoryResult<T> = std::result::Result<T, InventoryError>;
