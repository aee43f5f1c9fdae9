//! Barcodes Service

use std::sync::Arc;

use async_trait::async_trait;
use labels::label::LabelContent;
use mockall::automock;
use tokio::sync::Mutex;
use tracing::{Span, info, warn};

use crate::{
    domain::barcodes::{
        errors::BarcodesServiceError,
        models::{BarcodeRecord, BarcodeUuid},
        repository::JsonBarcodesRepository,
    },
    storage::SlotStore,
};

/// Saved barcodes kept in memory and flushed to a slot after every mutation.
pub struct JsonBarcodesService {
    repository: JsonBarcodesRepository,
    records: Mutex<Vec<BarcodeRecord>>,
}

impl JsonBarcodesService {
    /// Load the collection stored in `slot`.
    pub async fn load(store: Arc<dyn SlotStore>, slot: impl Into<String>) -> Self {
        let repository = JsonBarcodesRepository::new(store, slot);
        let records = repository.load().await;

        Self {
            repository,
            records: Mutex::new(records),
        }
    }
}

impl std::fmt::Debug for JsonBarcodesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonBarcodesService").finish_non_exhaustive()
    }
}

#[async_trait]
impl BarcodesService for JsonBarcodesService {
    async fn list_barcodes(&self) -> Vec<BarcodeRecord> {
        self.records.lock().await.clone()
    }

    async fn get_barcode(&self, id: BarcodeUuid) -> Result<BarcodeRecord, BarcodesServiceError> {
        self.records
            .lock()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(BarcodesServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "barcodes.service.add_barcode",
        skip(self, content),
        fields(item_code = %content.code, barcode_id = tracing::field::Empty),
        err
    )]
    async fn add_barcode(
        &self,
        content: LabelContent,
    ) -> Result<BarcodeRecord, BarcodesServiceError> {
        let mut records = self.records.lock().await;

        if records.iter().any(|record| record.item_code == content.code) {
            warn!("item code is already saved");

            return Err(BarcodesServiceError::AlreadyExists(content.code));
        }

        let record = BarcodeRecord::new(content);

        Span::current().record("barcode_id", tracing::field::display(record.id));

        let mut next = Vec::with_capacity(records.len() + 1);
        next.push(record.clone());
        next.extend(records.iter().cloned());

        self.repository.save(&next).await?;

        *records = next;

        info!("saved barcode");

        Ok(record)
    }

    #[tracing::instrument(
        name = "barcodes.service.remove_barcode",
        skip(self),
        fields(barcode_id = %id),
        err
    )]
    async fn remove_barcode(
        &self,
        id: BarcodeUuid,
    ) -> Result<Option<BarcodeRecord>, BarcodesServiceError> {
        let mut records = self.records.lock().await;

        let Some(removed) = records.iter().find(|record| record.id == id).cloned() else {
            info!("barcode not found, nothing to remove");

            return Ok(None);
        };

        let next: Vec<BarcodeRecord> = records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();

        self.repository.save(&next).await?;

        *records = next;

        info!("removed barcode");

        Ok(Some(removed))
    }

    async fn count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[automock]
#[async_trait]
pub trait BarcodesService: Send + Sync {
    /// All saved barcodes, newest first.
    async fn list_barcodes(&self) -> Vec<BarcodeRecord>;

    /// Retrieve a single saved barcode.
    async fn get_barcode(&self, id: BarcodeUuid) -> Result<BarcodeRecord, BarcodesServiceError>;

    /// Save a barcode for confirmed label content at the front of the
    /// collection. Item codes are unique.
    async fn add_barcode(
        &self,
        content: LabelContent,
    ) -> Result<BarcodeRecord, BarcodesServiceError>;

    /// Remove a saved barcode, returning it. Unknown ids are a no-op.
    async fn remove_barcode(
        &self,
        id: BarcodeUuid,
    ) -> Result<Option<BarcodeRecord>, BarcodesServiceError>;

    /// Number of saved barcodes.
    async fn count(&self) -> usize;
}
