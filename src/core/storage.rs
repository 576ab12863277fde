//! Persistent preference storage abstractions
//!
//! Two layers: a [`KeyValueCollection`] moves raw bytes in and out of a
//! backend, and [`PreferenceStorage`] exposes the record-oriented
//! `get(keys)` / `set(record)` interface the stores are written against.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub const SELECTED_CURRENCIES_KEY: &str = "selectedCurrencies";
pub const IS_INITIALIZED_KEY: &str = "isInitialized";
pub const FAVORITE_CURRENCIES_KEY: &str = "favoriteCurrencies";

/// A set of named values read from or written to storage in one call.
pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage API is not available")]
    Unavailable,
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error("Failed to (de)serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<fjall::Error> for StoreError {
    fn from(e: fjall::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes all entries as one unit: either every entry lands or none does.
    async fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StoreError>;
}

/// Named collections, persistent or in-memory.
pub trait Store {
    fn get_collection(&self, name: &str, persist: bool) -> Option<Arc<dyn KeyValueCollection>>;
}

#[async_trait]
pub trait PreferenceStorage: Send + Sync {
    fn is_available(&self) -> bool;

    /// Returns the stored values for `keys`. Missing keys are absent from the record.
    async fn get(&self, keys: &[&str]) -> Result<Record, StoreError>;

    async fn set(&self, record: Record) -> Result<(), StoreError>;
}

/// [`PreferenceStorage`] over a key-value collection that may not exist.
///
/// Values are stored as JSON. Without a collection every call fails with
/// [`StoreError::Unavailable`].
pub struct CollectionStorage {
    collection: Option<Arc<dyn KeyValueCollection>>,
}

impl CollectionStorage {
    pub fn new(collection: Arc<dyn KeyValueCollection>) -> Self {
        Self {
            collection: Some(collection),
        }
    }

    pub fn unavailable() -> Self {
        Self { collection: None }
    }

    pub fn from_store(store: &dyn Store, name: &str, persist: bool) -> Self {
        Self {
            collection: store.get_collection(name, persist),
        }
    }

    fn collection(&self) -> Result<&Arc<dyn KeyValueCollection>, StoreError> {
        self.collection.as_ref().ok_or(StoreError::Unavailable)
    }
}

#[async_trait]
impl PreferenceStorage for CollectionStorage {
    fn is_available(&self) -> bool {
        self.collection.is_some()
    }

    async fn get(&self, keys: &[&str]) -> Result<Record, StoreError> {
        let collection = self.collection()?;
        let mut record = Record::new();
        for key in keys {
            if let Some(bytes) = collection.get(key.as_bytes()).await? {
                record.insert(key.to_string(), serde_json::from_slice(&bytes)?);
            }
        }
        debug!(?keys, found = record.len(), "Storage GET");
        Ok(record)
    }

    async fn set(&self, record: Record) -> Result<(), StoreError> {
        let collection = self.collection()?;
        let entries = record
            .iter()
            .map(|(key, value)| -> Result<_, StoreError> {
                Ok((key.as_bytes().to_vec(), serde_json::to_vec(value)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        collection.put_batch(entries).await?;
        debug!(keys = ?record.keys().collect::<Vec<_>>(), "Storage SET");
        Ok(())
    }
}

/// Reads a stored array of codes. Duplicates collapse, non-strings are skipped,
/// anything that is not an array reads as the empty set.
pub fn decode_code_set(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => BTreeSet::new(),
    }
}

pub fn encode_code_set(codes: &BTreeSet<String>) -> Value {
    Value::Array(codes.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::memory::MemoryCollection;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reads succeed, every write fails.
    pub(crate) struct ReadOnlyCollection {
        inner: MemoryCollection,
        pub(crate) failed_writes: AtomicUsize,
    }

    impl ReadOnlyCollection {
        pub(crate) fn new() -> Self {
            Self {
                inner: MemoryCollection::new(),
                failed_writes: AtomicUsize::new(0),
            }
        }

        pub(crate) async fn seed(&self, key: &str, value: Value) {
            self.inner
                .put_batch(vec![(
                    key.as_bytes().to_vec(),
                    serde_json::to_vec(&value).unwrap(),
                )])
                .await
                .unwrap();
        }
    }

    #[async_trait]
    impl KeyValueCollection for ReadOnlyCollection {
        async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get(key).await
        }

        async fn put_batch(&self, _entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StoreError> {
            self.failed_writes.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Backend("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_get_set_round_trip() {
        let storage = CollectionStorage::new(Arc::new(MemoryCollection::new()));
        assert!(storage.is_available());

        let mut record = Record::new();
        record.insert(IS_INITIALIZED_KEY.to_string(), json!(true));
        record.insert(SELECTED_CURRENCIES_KEY.to_string(), json!(["USD", "EUR"]));
        storage.set(record).await.unwrap();

        let loaded = storage
            .get(&[IS_INITIALIZED_KEY, SELECTED_CURRENCIES_KEY, FAVORITE_CURRENCIES_KEY])
            .await
            .unwrap();
        assert_eq!(loaded.get(IS_INITIALIZED_KEY), Some(&json!(true)));
        assert_eq!(
            loaded.get(SELECTED_CURRENCIES_KEY),
            Some(&json!(["USD", "EUR"]))
        );
        assert!(!loaded.contains_key(FAVORITE_CURRENCIES_KEY));
    }

    #[tokio::test]
    async fn test_unavailable_storage_errors() {
        let storage = CollectionStorage::unavailable();
        assert!(!storage.is_available());
        assert!(matches!(
            storage.get(&[IS_INITIALIZED_KEY]).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(
            storage.set(Record::new()).await,
            Err(StoreError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_corrupt_value_is_a_serialization_error() {
        let collection = Arc::new(MemoryCollection::new());
        collection
            .put_batch(vec![(b"isInitialized".to_vec(), b"{not json".to_vec())])
            .await
            .unwrap();
        let storage = CollectionStorage::new(collection);
        assert!(matches!(
            storage.get(&[IS_INITIALIZED_KEY]).await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_decode_code_set_deduplicates() {
        let value = json!(["USD", "EUR", "USD", 42, null]);
        let codes = decode_code_set(Some(&value));
        assert_eq!(
            codes,
            BTreeSet::from(["EUR".to_string(), "USD".to_string()])
        );
        assert!(decode_code_set(Some(&json!("USD"))).is_empty());
        assert!(decode_code_set(None).is_empty());
    }
}
