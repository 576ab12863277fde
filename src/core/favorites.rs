use crate::core::storage::{
    FAVORITE_CURRENCIES_KEY, PreferenceStorage, Record, decode_code_set, encode_code_set,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

/// Starred currency codes.
///
/// Favorites are never checked against the published codes; a favorite that
/// is not quoted today simply stays in the set.
pub struct FavoriteStore {
    storage: Arc<dyn PreferenceStorage>,
    favorites: BTreeSet<String>,
    loaded: bool,
}

impl FavoriteStore {
    pub fn new(storage: Arc<dyn PreferenceStorage>) -> Self {
        Self {
            storage,
            favorites: BTreeSet::new(),
            loaded: false,
        }
    }

    /// Reads the saved favorites, replacing the in-memory set.
    pub async fn load(&mut self) -> &BTreeSet<String> {
        self.favorites = if self.storage.is_available() {
            match self.storage.get(&[FAVORITE_CURRENCIES_KEY]).await {
                Ok(record) => decode_code_set(record.get(FAVORITE_CURRENCIES_KEY)),
                Err(e) => {
                    warn!("Failed to load favorites: {}", e);
                    BTreeSet::new()
                }
            }
        } else {
            BTreeSet::new()
        };
        self.loaded = true;
        &self.favorites
    }

    /// Flips `code`. Returns whether it is a favorite afterwards.
    pub async fn toggle(&mut self, code: &str) -> bool {
        self.ensure_loaded().await;
        let now_favorite = if self.favorites.remove(code) {
            false
        } else {
            self.favorites.insert(code.to_string());
            true
        };
        self.save().await;
        now_favorite
    }

    pub async fn add(&mut self, code: &str) {
        self.ensure_loaded().await;
        self.favorites.insert(code.to_string());
        self.save().await;
    }

    pub async fn remove(&mut self, code: &str) {
        self.ensure_loaded().await;
        self.favorites.remove(code);
        self.save().await;
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.favorites.contains(code)
    }

    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    async fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load().await;
        }
    }

    async fn save(&self) {
        if !self.storage.is_available() {
            return;
        }
        let mut record = Record::new();
        record.insert(
            FAVORITE_CURRENCIES_KEY.to_string(),
            encode_code_set(&self.favorites),
        );
        if let Err(e) = self.storage.set(record).await {
            warn!("Failed to save favorites: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::CollectionStorage;
    use crate::core::storage::tests::ReadOnlyCollection;
    use crate::store::memory::MemoryCollection;
    use serde_json::json;

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_mutations_persist_full_set() {
        let storage = Arc::new(CollectionStorage::new(Arc::new(MemoryCollection::new())));
        let mut store = FavoriteStore::new(storage.clone());

        assert!(store.toggle("USD").await);
        store.add("EUR").await;
        store.add("XEU").await;
        store.remove("EUR").await;
        assert!(!store.toggle("USD").await);

        assert_eq!(store.favorites(), &set(&["XEU"]));
        let record = storage.get(&[FAVORITE_CURRENCIES_KEY]).await.unwrap();
        assert_eq!(
            decode_code_set(record.get(FAVORITE_CURRENCIES_KEY)),
            set(&["XEU"])
        );

        let mut reopened = FavoriteStore::new(storage);
        assert_eq!(reopened.load().await, &set(&["XEU"]));
        assert!(reopened.is_favorite("XEU"));
    }

    #[tokio::test]
    async fn test_first_mutation_loads_saved_set() {
        let storage = Arc::new(CollectionStorage::new(Arc::new(MemoryCollection::new())));
        let mut record = Record::new();
        record.insert(FAVORITE_CURRENCIES_KEY.to_string(), json!(["GBP", "GBP"]));
        storage.set(record).await.unwrap();

        let mut store = FavoriteStore::new(storage);
        store.add("USD").await;
        assert_eq!(store.favorites(), &set(&["GBP", "USD"]));
    }

    #[tokio::test]
    async fn test_unavailable_storage_keeps_session_state() {
        let mut store = FavoriteStore::new(Arc::new(CollectionStorage::unavailable()));
        assert!(store.load().await.is_empty());

        store.add("USD").await;
        assert!(store.is_favorite("USD"));
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory_state() {
        let collection = Arc::new(ReadOnlyCollection::new());
        collection.seed(FAVORITE_CURRENCIES_KEY, json!(["CHF"])).await;
        let mut store = FavoriteStore::new(Arc::new(CollectionStorage::new(collection)));

        assert!(store.toggle("USD").await);
        assert_eq!(store.favorites(), &set(&["CHF", "USD"]));
    }
}
