use crate::core::storage::{KeyValueCollection, StoreError};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionHandle, PersistMode};
use tracing::debug;

/// Collection backed by one fjall partition.
///
/// Batches are committed atomically and synced before returning.
pub struct DiskCollection {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn new(keyspace: Keyspace, partition: PartitionHandle) -> Self {
        Self {
            keyspace,
            partition,
        }
    }
}

#[async_trait]
impl KeyValueCollection for DiskCollection {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self.partition.get(key)?.map(|slice| slice.to_vec());
        if value.is_some() {
            debug!("Disk HIT for key: {}", String::from_utf8_lossy(key));
        } else {
            debug!("Disk MISS for key: {}", String::from_utf8_lossy(key));
        }
        Ok(value)
    }

    async fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StoreError> {
        let count = entries.len();
        let mut batch = self.keyspace.batch();
        for (key, value) in entries {
            batch.insert(&self.partition, key, value);
        }
        batch.commit()?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Disk PUT of {} entries", count);
        Ok(())
    }
}
