use crate::core::storage::{KeyValueCollection, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory collection. Contents live as long as the process.
pub struct MemoryCollection {
    inner: Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueCollection for MemoryCollection {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let map = self.inner.lock().await;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Memory HIT for key: {}", String::from_utf8_lossy(key));
        } else {
            debug!("Memory MISS for key: {}", String::from_utf8_lossy(key));
        }
        Ok(value)
    }

    async fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StoreError> {
        let mut map = self.inner.lock().await;
        debug!("Memory PUT of {} entries", entries.len());
        map.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_get_put() {
        let collection = MemoryCollection::new();

        // Initially, collection is empty
        assert!(collection.get(b"key1").await.unwrap().is_none());

        collection
            .put_batch(vec![(b"key1".to_vec(), b"123".to_vec())])
            .await
            .unwrap();

        assert_eq!(collection.get(b"key1").await.unwrap(), Some(b"123".to_vec()));
        assert!(collection.get(b"key2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_batch_overwrites() {
        let collection = MemoryCollection::new();

        collection
            .put_batch(vec![
                (b"key1".to_vec(), b"1".to_vec()),
                (b"key2".to_vec(), b"2".to_vec()),
            ])
            .await
            .unwrap();
        collection
            .put_batch(vec![(b"key1".to_vec(), b"3".to_vec())])
            .await
            .unwrap();

        assert_eq!(collection.get(b"key1").await.unwrap(), Some(b"3".to_vec()));
        assert_eq!(collection.get(b"key2").await.unwrap(), Some(b"2".to_vec()));
    }
}
