//! # Outbound Ports (Driven Ports)
//!
//! Interfaces the host application implements for the ledger.
//!
//! Adapters:
//! - `InMemoryKVStore`, `FileBackedKVStore` (`adapters/storage`)
//! - `StaticContext` (`adapters/context.rs`)

use crate::domain::errors::{ContextError, KVStoreError};

/// The replicated key-value store the ledger lives in.
///
/// A single invocation must see a consistent snapshot: a `put` is visible to
/// every later `get` in the same invocation. No cross-key atomicity is
/// assumed.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair, overwriting any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Host-supplied view of the invocation's credential attributes.
pub trait ExecutionContext {
    /// Read a named attribute of the caller's credential.
    fn read_attribute(&self, name: &str) -> Result<Vec<u8>, ContextError>;
}
