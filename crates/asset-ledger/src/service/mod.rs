//! # Asset Ledger Service
//!
//! The state machine behind [`AssetLedgerApi`](crate::ports::inbound::AssetLedgerApi).
//!
//! ## Architecture
//!
//! - `identity.rs` - Identity Resolver (caller username and role)
//! - `records.rs` - Asset Record Store and credential lookups
//! - `catalog.rs` - Append-only Asset Catalog
//! - `router.rs` - Operation Router for both entry points and bootstrap
//! - `helpers.rs` - Record encoding and store access with error context
//!
//! Every invocation starts from a cold read of the store. The service keeps
//! no cache, reads no clock and no randomness, so replaying the same
//! invocations in the same order yields the same store on every replica.

mod catalog;
mod helpers;
mod identity;
mod records;
mod router;
#[cfg(test)]
mod tests;

pub use identity::resolve_caller;

use crate::domain::value_objects::LedgerConfig;
use crate::ports::outbound::KeyValueStore;

/// The asset ledger state machine over a host key-value store.
pub struct AssetLedger<KV>
where
    KV: KeyValueStore,
{
    /// Key-value store for persistence.
    pub(crate) kv_store: KV,
    /// Ledger configuration.
    pub(crate) config: LedgerConfig,
}

impl<KV> AssetLedger<KV>
where
    KV: KeyValueStore,
{
    /// Create a ledger over `kv_store`. Nothing is read or written until the
    /// first invocation.
    pub fn new(kv_store: KV, config: LedgerConfig) -> Self {
        Self { kv_store, config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &KV {
        &self.kv_store
    }

    /// Mutably borrow the underlying store.
    pub fn store_mut(&mut self) -> &mut KV {
        &mut self.kv_store
    }

    /// Consume the ledger, returning the underlying store.
    pub fn into_store(self) -> KV {
        self.kv_store
    }
}
