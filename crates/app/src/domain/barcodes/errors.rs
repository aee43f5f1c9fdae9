//! Barcodes service errors.

use labels::items::ItemCode;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum BarcodesServiceError {
    #[error("a barcode for item code {0} is already saved")]
    AlreadyExists(ItemCode),

    #[error("barcode not found")]
    NotFound,

    #[error("failed to serialize barcodes")]
    Serialize(#[source] serde_json::Error),

    #[error("storage error")]
    Storage(#[from] StorageError),
}
