//! File-backed slots.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{SlotStore, StorageError, check_slot};

/// Stores each slot as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Store slots under `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        check_slot(slot)?;

        match fs::read_to_string(self.slot_path(slot)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    async fn write(&self, slot: &str, contents: &str) -> Result<(), StorageError> {
        check_slot(slot)?;

        let write_error = |source| StorageError::Write {
            slot: slot.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).await.map_err(write_error)?;

        let path = self.slot_path(slot);
        let staging = self.dir.join(format!(".{slot}.json.tmp"));

        fs::write(&staging, contents).await.map_err(write_error)?;
        fs::rename(&staging, &path).await.map_err(write_error)?;

        debug!(path = %path.display(), bytes = contents.len(), "wrote slot");

        Ok(())
    }
}
