//! In-process slots.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{SlotStore, StorageError, check_slot};

/// Slots held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one slot already populated.
    pub fn with_slot(slot: &str, contents: &str) -> Self {
        Self {
            slots: Mutex::new(HashMap::from([(slot.to_string(), contents.to_string())])),
        }
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        check_slot(slot)?;

        Ok(self.slots.lock().await.get(slot).cloned())
    }

    async fn write(&self, slot: &str, contents: &str) -> Result<(), StorageError> {
        check_slot(slot)?;

        self.slots
            .lock()
            .await
            .insert(slot.to_string(), contents.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn slots_are_independent() -> TestResult {
        let store = MemorySlotStore::with_slot("a", "first");

        store.write("b", "second").await?;

        assert_eq!(store.read("a").await?.as_deref(), Some("first"));
        assert_eq!(store.read("b").await?.as_deref(), Some("second"));
        assert_eq!(store.read("c").await?, None);

        Ok(())
    }
}
