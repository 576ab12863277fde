pub mod disk;
pub mod memory;

use crate::core::storage::{KeyValueCollection, Store};
use disk::DiskCollection;
use fjall::{Keyspace, PartitionCreateOptions};
use memory::MemoryCollection;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};
use tracing::{debug, warn};

/// A key-value store that hands out named collections.
///
/// Persistent collections live in a fjall keyspace. If the keyspace cannot be
/// opened, persistent collections are unavailable and callers degrade.
pub struct KeyValueStore {
    collections: RwLock<HashMap<String, Arc<dyn KeyValueCollection>>>,
    keyspace: Option<Keyspace>,
}

impl KeyValueStore {
    pub fn open(data_path: &Path) -> Self {
        let keyspace = match fjall::Config::new(data_path.join("store")).open() {
            Ok(keyspace) => {
                debug!("Opened keyspace at {}", data_path.display());
                Some(keyspace)
            }
            Err(e) => {
                warn!(
                    "Persistent storage unavailable at {}: {}",
                    data_path.display(),
                    e
                );
                None
            }
        };

        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace,
        }
    }

    /// A store with no persistent backend.
    pub fn in_memory() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace: None,
        }
    }

    fn open_collection(&self, name: &str, persist: bool) -> Option<Arc<dyn KeyValueCollection>> {
        if !persist {
            return Some(Arc::new(MemoryCollection::new()));
        }
        let keyspace = self.keyspace.as_ref()?;
        match keyspace.open_partition(name, PartitionCreateOptions::default()) {
            Ok(partition) => Some(Arc::new(DiskCollection::new(keyspace.clone(), partition))),
            Err(e) => {
                warn!("Failed to open partition {}: {}", name, e);
                None
            }
        }
    }
}

impl Store for KeyValueStore {
    fn get_collection(&self, name: &str, persist: bool) -> Option<Arc<dyn KeyValueCollection>> {
        let key = format!("{name}:{persist}");
        if let Some(existing) = self
            .collections
            .read()
            .ok()
            .and_then(|collections| collections.get(&key).cloned())
        {
            return Some(existing);
        }

        let collection = self.open_collection(name, persist)?;
        if let Ok(mut collections) = self.collections.write() {
            collections.insert(key, Arc::clone(&collection));
        }
        Some(collection)
    }
}
