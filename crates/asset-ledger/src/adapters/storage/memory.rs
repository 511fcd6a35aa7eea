use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory key-value store for tests and embedding.
///
/// Writes to keys registered with [`InMemoryKVStore::reject_writes_to`] fail
/// with [`KVStoreError::Rejected`], which lets tests drive the ledger's
/// persistence-failure paths.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    rejected_keys: BTreeSet<Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `put` to `key` fail.
    pub fn reject_writes_to(&mut self, key: impl AsRef<[u8]>) {
        self.rejected_keys.insert(key.as_ref().to_vec());
    }

    /// Let writes to `key` succeed again.
    pub fn accept_writes_to(&mut self, key: impl AsRef<[u8]>) {
        self.rejected_keys.remove(key.as_ref());
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All keys, ascending.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.data.keys().map(Vec::as_slice)
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        if self.rejected_keys.contains(key) {
            return Err(KVStoreError::Rejected {
                message: format!("write to '{}' refused", String::from_utf8_lossy(key)),
            });
        }
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
