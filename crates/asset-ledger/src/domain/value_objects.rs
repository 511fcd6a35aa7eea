//! # Value Objects
//!
//! Configuration and key layout for the asset ledger.

use super::authorization::PermissionTable;

/// Key holding the serialized catalog.
pub const CATALOG_KEY: &str = "currHolder";

/// Payload returned by `ping`.
pub const LIVENESS_PAYLOAD: &[u8] = b"Hello, world!";

/// Execution-context attribute carrying the caller's username.
pub const USERNAME_ATTRIBUTE: &str = "username";

/// Execution-context attribute carrying the caller's role.
pub const ROLE_ATTRIBUTE: &str = "role";

/// Configuration for the ledger.
///
/// Every replica must run with the same configuration; a differing
/// permission table or catalog key diverges the ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Key the catalog record is stored under (default: `currHolder`).
    pub catalog_key: String,

    /// Bytes returned by `ping` (default: `Hello, world!`).
    pub liveness_payload: Vec<u8>,

    /// Operation → permitted roles.
    pub permissions: PermissionTable,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            catalog_key: CATALOG_KEY.to_string(),
            liveness_payload: LIVENESS_PAYLOAD.to_vec(),
            permissions: PermissionTable::default(),
        }
    }
}

impl LedgerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog key.
    pub fn with_catalog_key(mut self, key: impl Into<String>) -> Self {
        self.catalog_key = key.into();
        self
    }

    /// Set the liveness payload.
    pub fn with_liveness_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.liveness_payload = payload.into();
        self
    }

    /// Replace the permission table.
    pub fn with_permissions(mut self, permissions: PermissionTable) -> Self {
        self.permissions = permissions;
        self
    }
}
