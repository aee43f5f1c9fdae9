//! Barcodes Repository

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    domain::barcodes::{errors::BarcodesServiceError, models::BarcodeRecord},
    storage::SlotStore,
};

/// The saved collection as a JSON array in a single slot.
#[derive(Clone)]
pub(crate) struct JsonBarcodesRepository {
    store: Arc<dyn SlotStore>,
    slot: String,
}

impl JsonBarcodesRepository {
    #[must_use]
    pub(crate) fn new(store: Arc<dyn SlotStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    /// Load the collection. An absent, unreadable or corrupt slot loads as an
    /// empty collection.
    #[tracing::instrument(
        name = "barcodes.repository.load",
        skip(self),
        fields(slot = %self.slot, record_count = tracing::field::Empty)
    )]
    pub(crate) async fn load(&self) -> Vec<BarcodeRecord> {
        let contents = match self.store.read(&self.slot).await {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                debug!("slot is empty, starting with no barcodes");
                return Vec::new();
            }
            Err(error) => {
                warn!(error = %error, "failed to read saved barcodes, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<BarcodeRecord>>(&contents) {
            Ok(records) => {
                tracing::Span::current().record("record_count", records.len());
                records
            }
            Err(error) => {
                warn!(error = %error, "saved barcodes are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored collection.
    #[tracing::instrument(
        name = "barcodes.repository.save",
        skip(self, records),
        fields(slot = %self.slot, record_count = records.len()),
        err
    )]
    pub(crate) async fn save(&self, records: &[BarcodeRecord]) -> Result<(), BarcodesServiceError> {
        let contents = serde_json::to_string(records).map_err(BarcodesServiceError::Serialize)?;

        self.store.write(&self.slot, &contents).await?;

        Ok(())
    }
}
