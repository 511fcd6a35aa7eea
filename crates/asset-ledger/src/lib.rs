//! # Asset Ledger
//!
//! A deterministic state machine that tracks ownership and per-holder
//! balances of a named asset type inside a replicated key-value store.
//!
//! ## Role in System
//!
//! The host (consensus, transport, credential issuance) orders invocations
//! and replays them on every replica. The ledger reads and writes the host's
//! store through the `KeyValueStore` port and identifies callers through the
//! `ExecutionContext` port. It never reads the clock or a random source.
//!
//! ## Entry Points
//!
//! | Operation | Entry | Args | Result |
//! |-----------|-------|------|--------|
//! | `createAsset` | mutating | id, name, kind, owner | empty |
//! | `ping` | both | - | `Hello, world!` |
//! | `getAssetInfo` | read-only | id | asset JSON |
//! | `getCredential` | read-only | name | raw credential |
//! | `getBalance` | read-only | id, holder | `{"identity","balance"}` |
//!
//! Bootstrap (`init`) takes `(name, credential)` pairs, writes an empty
//! catalog and seeds the credentials.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | 1 | Unique asset ids | `service/records.rs` - `create_asset()` |
//! | 2 | Only permitted roles create assets | `service/router.rs` - `admit()` |
//! | 3 | Catalog is append-only, in creation order | `domain/entities.rs` - `Catalog` |
//! | 4 | Asset saved before it is cataloged | `service/router.rs` - `handle_create_asset()` |
//! | 5 | Corrupt records are errors, never defaults | `service/helpers.rs` - `decode()` |
//! | 6 | Bootstrap never overwrites a catalog | `service/catalog.rs` - `initialize_catalog()` |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, roles and permissions, operation registry, errors
//! - `ports/` - Inbound API and outbound store/context traits
//! - `adapters/` - In-memory and file-backed stores, static contexts
//! - `service/` - The state machine implementing the API
//!
//! ## Usage
//!
//! ```
//! use asset_ledger::{AssetLedger, AssetLedgerApi, InMemoryKVStore, LedgerConfig, StaticContext};
//!
//! let mut ledger = AssetLedger::new(InMemoryKVStore::new(), LedgerConfig::default());
//! ledger.init(&["alice".into(), "certA".into()]).unwrap();
//!
//! let regulator = StaticContext::for_caller("reg", "regulator");
//! let args: Vec<String> = ["C1", "Gold", "1", "alice"].map(String::from).into();
//! ledger.invoke(&regulator, "createAsset", &args).unwrap();
//!
//! let info = ledger.query(&regulator, "getAssetInfo", &["C1".into()]).unwrap();
//! assert!(String::from_utf8(info).unwrap().contains("\"currid\":\"C1\""));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{FileBackedKVStore, InMemoryKVStore, NoAttributeContext, StaticContext};
pub use domain::{
    balance_of, Asset, BalanceReport, CallerContext, Catalog, ContextError, EntryPoint,
    KVStoreError, LedgerConfig, LedgerError, Operation, PermissionTable, RecordKind, Role,
};
pub use ports::inbound::AssetLedgerApi;
pub use ports::outbound::{ExecutionContext, KeyValueStore};
pub use service::{resolve_caller, AssetLedger};
