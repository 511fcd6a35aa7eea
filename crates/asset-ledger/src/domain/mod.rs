//! # Domain Layer
//!
//! Pure domain logic for the asset ledger. Nothing here touches the store.
//!
//! ## Modules
//!
//! - `entities` - Persisted records (Asset, Catalog) and the caller context
//! - `authorization` - Roles and the permission table
//! - `operations` - Operation registry for both entry points
//! - `balance` - Balance evaluation
//! - `value_objects` - Configuration and key layout
//! - `errors` - Domain error types

pub mod authorization;
pub mod balance;
pub mod entities;
pub mod errors;
pub mod operations;
pub mod value_objects;

pub use authorization::{PermissionTable, Role, UnknownRole};
pub use balance::{balance_of, balance_report};
pub use entities::{Asset, BalanceReport, Balances, CallerContext, Catalog};
pub use errors::{ContextError, KVStoreError, LedgerError, RecordKind};
pub use operations::{EntryPoint, Operation, OperationInfo, OPERATION_REGISTRY};
pub use value_objects::{
    LedgerConfig, CATALOG_KEY, LIVENESS_PAYLOAD, ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE,
};
