//! In-memory store (tests, embedding).

use super::{ChangeListener, ChangedKeys, ProfileStore, StoreError, StoreKey, StoredRecord};

#[derive(Default)]
pub struct MemoryStore {
    record: StoredRecord,
    listeners: Vec<ChangeListener>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: StoredRecord) -> Self {
        Self {
            record,
            listeners: Vec::new(),
        }
    }

    pub fn record(&self) -> &StoredRecord {
        &self.record
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("record", &self.record)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, keys: &[StoreKey]) -> Result<StoredRecord, StoreError> {
        Ok(self.record.select(keys))
    }

    fn set(&mut self, record: StoredRecord) -> Result<ChangedKeys, StoreError> {
        let changed = self.record.merge(record);
        if !changed.is_empty() {
            for listener in &mut self.listeners {
                listener(&changed);
            }
        }
        Ok(changed)
    }

    fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}
