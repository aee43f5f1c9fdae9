//! Slot Storage
//!
//! Durable local storage is a keyed set of named text slots. The barcodes
//! repository keeps its whole collection in a single slot.

use std::io;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileSlotStore;
pub use memory::MemorySlotStore;

/// Errors raised by slot stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Slot names are used as file stems and must stay path-safe.
    #[error("invalid slot name `{0}`")]
    InvalidSlot(String),

    /// Reading a slot failed.
    #[error("failed to read slot `{slot}`")]
    Read {
        /// Slot name.
        slot: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing a slot failed.
    #[error("failed to write slot `{slot}`")]
    Write {
        /// Slot name.
        slot: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A keyed store of named text slots.
#[automock]
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Read a slot, `None` when it has never been written.
    async fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace the contents of a slot.
    async fn write(&self, slot: &str, contents: &str) -> Result<(), StorageError>;
}

/// Check that a slot name is non-empty and limited to `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidSlot`] otherwise.
pub fn check_slot(slot: &str) -> Result<(), StorageError> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidSlot(slot.to_string()))
    }
}
