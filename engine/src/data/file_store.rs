// Key-value store backed by one JSON object file: {"bill": "100", "friends": "[...]", ...}
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

use super::store::KeyValueStore;
use crate::error::EngineError;

type Slots = BTreeMap<String, String>;

pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles of `set_many`.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_slots(&self) -> Result<Slots, EngineError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Slots::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "State file does not exist yet");
                Ok(Slots::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_slots(&self, slots: &Slots) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let contents = serde_json::to_string_pretty(slots)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, contents).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        let mut slots = self.read_slots().await?;
        Ok(slots.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), EngineError> {
        self.set_many(&[(key, value)]).await
    }

    // One read, one write of the temp file and one rename per batch, so the
    // file holds either the old slots or all of the new ones.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), EngineError> {
        let _guard = self.write_lock.lock().await;
        let mut slots = self.read_slots().await?;
        for (key, value) in entries {
            slots.insert(key.to_string(), value.clone());
        }
        self.write_slots(&slots).await?;
        tracing::trace!(slots = entries.len(), path = %self.path.display(), "Slots written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get("bill").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");
        let store = JsonFileStore::new(&path);
        store.set("bill", "100".to_string()).await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_slots_survive_a_new_store_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        {
            let store = JsonFileStore::new(&path);
            store.set("bill", "100".to_string()).await.unwrap();
            store.set("tipPercentage", "10".to_string()).await.unwrap();
        }
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("bill").await.unwrap(), Some("100".to_string()));
        assert_eq!(reopened.get("tipPercentage").await.unwrap(), Some("10".to_string()));
        assert_eq!(reopened.get("friends").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_layout_is_a_json_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);
        store.set("friends", "[]".to_string()).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!({ "friends": "[]" }));
    }

    #[tokio::test]
    async fn test_set_many_writes_every_slot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);
        store.set("bill", "20".to_string()).await.unwrap();
        store
            .set_many(&[("bill", "50".to_string()), ("tipPercentage", "10".to_string()), ("friends", "[]".to_string())])
            .await
            .unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!({ "bill": "50", "tipPercentage": "10", "friends": "[]" }));
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);
        store.set("bill", "20".to_string()).await.unwrap();
        // A directory where the temp file should go makes the write fail.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        let result = store.set_many(&[("friends", "[]".to_string()), ("bill", "50".to_string())]).await;
        assert!(matches!(result, Err(EngineError::IoError { .. })));
        assert_eq!(store.get("bill").await.unwrap(), Some("20".to_string()));
        assert_eq!(store.get("friends").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get("bill").await, Err(EngineError::SerializationError { .. })));
    }
}
