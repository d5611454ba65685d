use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{KvStore, KvTransaction, StoreError};

/// In-memory store backing the test suite; same contract as the Postgres one.
#[derive(Default)]
pub struct MemoryKvStore {
    map: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.map.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.map.lock().await.remove(key);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .map
            .lock()
            .await
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, value)| value.clone())
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn KvTransaction>, StoreError> {
        let guard = self.map.clone().lock_owned().await;
        Ok(Box::new(MemoryKvTransaction {
            guard,
            staged: BTreeMap::new(),
        }))
    }
}

/// Holds the store lock for its lifetime. Writes stage until commit, so a
/// transaction dropped early leaves the map untouched.
pub struct MemoryKvTransaction {
    guard: OwnedMutexGuard<BTreeMap<String, Value>>,
    staged: BTreeMap<String, Value>,
}

#[async_trait]
impl KvTransaction for MemoryKvTransaction {
    async fn get(&mut self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .staged
            .get(key)
            .or_else(|| self.guard.get(key))
            .cloned())
    }

    async fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.staged.insert(key.to_string(), value);
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        let staged = std::mem::take(&mut self.staged);
        self.guard.extend(staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_delete_roundtrip() {
        let store = MemoryKvStore::new();
        store.set("medicine:1", json!({"n": 1})).await.unwrap();
        assert_eq!(store.get("medicine:1").await.unwrap(), Some(json!({"n": 1})));

        store.delete("medicine:1").await.unwrap();
        assert_eq!(store.get("medicine:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn prefix_scan_is_bounded_to_prefix() {
        let store = MemoryKvStore::new();
        store.set("medicine:1", json!(1)).await.unwrap();
        store.set("medicine:2", json!(2)).await.unwrap();
        store.set("purchase:1", json!(3)).await.unwrap();

        let medicines = store.get_by_prefix("medicine:").await.unwrap();
        assert_eq!(medicines.len(), 2);
        assert!(store.get_by_prefix("sale:").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn transaction_reads_see_own_writes() {
        let store = MemoryKvStore::new();
        store.set("medicine:1", json!({"quantity": 5})).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.set("medicine:1", json!({"quantity": 8})).await.unwrap();
        assert_eq!(
            tx.get("medicine:1").await.unwrap(),
            Some(json!({"quantity": 8}))
        );
        tx.commit().await.unwrap();

        assert_eq!(
            store.get("medicine:1").await.unwrap(),
            Some(json!({"quantity": 8}))
        );
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() {
        let store = MemoryKvStore::new();
        store.set("medicine:1", json!(5)).await.unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            tx.set("medicine:1", json!(99)).await.unwrap();
            tx.set("sale:1", json!({})).await.unwrap();
        }

        assert_eq!(store.get("medicine:1").await.unwrap(), Some(json!(5)));
        assert_eq!(store.get("sale:1").await.unwrap(), None);
    }
}
