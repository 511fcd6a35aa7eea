//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: In-memory and file-backed key-value stores
//! - `context`: Execution contexts with fixed or no attributes

pub mod context;
pub mod storage;

pub use context::{NoAttributeContext, StaticContext};
pub use storage::{FileBackedKVStore, InMemoryKVStore};
