use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::EngineError;

/// Abstraction over the storage that keeps named string slots between runs.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a slot; `Ok(None)` when it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError>;

    /// Overwrites a slot.
    async fn set(&self, key: &str, value: String) -> Result<(), EngineError>;

    /// Overwrites several slots at once. Either every entry is stored or none is.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), EngineError>;
}

#[derive(Default)]
struct MemorySlots {
    values: HashMap<String, String>,
    refused_slot: Option<String>,
}

/// In-process store. Clones share the same slots, and reads or writes can be
/// made to fail on purpose to exercise error paths.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slots: Arc<RwLock<MemorySlots>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every write that touches `key` fail; `None` lifts the restriction.
    pub async fn refuse_writes_to(&self, key: Option<&str>) {
        self.slots.write().await.refused_slot = key.map(str::to_string);
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(EngineError::StorageError(format!("read of slot '{}' refused", key)));
        }
        Ok(self.slots.read().await.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), EngineError> {
        self.set_many(&[(key, value)]).await
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), EngineError> {
        let mut slots = self.slots.write().await;
        for (key, _) in entries {
            let refused = slots.refused_slot.as_deref() == Some(*key);
            if refused || self.fail_writes.load(Ordering::SeqCst) {
                return Err(EngineError::StorageError(format!("write of slot '{}' refused", key)));
            }
        }
        for (key, value) in entries {
            slots.values.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}
