use amber::ports::StoreAdapter;
use async_trait::async_trait;
use dashmap::DashMap;
use shared::Result;

/// In-process store adapter backed by a concurrent hash map.
///
/// Always ready; useful for tests and for callers that want expiration
/// semantics without persistence.
#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.records.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.records.clear();
        Ok(())
    }

    async fn probe(&self) -> Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("records", &self.records.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amber::{CachedValue, ExpiringCache};
    use serde_json::json;
    use shared::TtlMinutes;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_memory_read_write_delete() {
        let store = MemoryStore::new();

        assert_eq!(store.read("thekey").await.unwrap(), None);

        store.write("thekey", "thevalue").await.unwrap();
        assert_eq!(
            store.read("thekey").await.unwrap(),
            Some("thevalue".to_string())
        );

        store.delete("thekey").await.unwrap();
        assert_eq!(store.read("thekey").await.unwrap(), None);
        assert!(store.is_empty());

        // Deleting an absent key is not an error.
        store.delete("thekey").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_clear() {
        let store = MemoryStore::new();

        store.write("a", "1").await.unwrap();
        store.write("b", "2").await.unwrap();
        assert_eq!(store.len(), 2);

        store.clear().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_cache_over_memory() {
        let cache = ExpiringCache::new(Arc::new(MemoryStore::new()));

        assert!(cache.supported().await);

        cache
            .set("objectkey", &json!({"key1": "Test", "key2": 1}), Some(TtlMinutes(3)))
            .await
            .unwrap();
        assert_eq!(
            cache.get("objectkey").await.unwrap().unwrap(),
            CachedValue::Json(json!({"key1": "Test", "key2": 1}))
        );

        cache.flush().await.unwrap();
        assert_eq!(cache.get("objectkey").await.unwrap(), None);
    }
}
