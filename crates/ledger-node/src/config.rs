//! # Node Configuration
//!
//! Host settings, layered as defaults, then environment, then command-line
//! flags (applied by the binary through the `with_*` methods).
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `LEDGER_DATA_FILE` | Store file | `ledger.db` |
//! | `LEDGER_LOG` | `tracing` filter directive | `info` |
//! | `LEDGER_CREATE_ROLES` | Comma-separated roles allowed to create assets | `regulator` |

use asset_ledger::domain::UnknownRole;
use asset_ledger::{LedgerConfig, Operation, PermissionTable, Role};
use std::path::PathBuf;
use thiserror::Error;

pub const DATA_FILE_VAR: &str = "LEDGER_DATA_FILE";
pub const LOG_VAR: &str = "LEDGER_LOG";
pub const CREATE_ROLES_VAR: &str = "LEDGER_CREATE_ROLES";

pub const DEFAULT_DATA_FILE: &str = "ledger.db";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{origin}: {source}")]
    UnknownRole {
        origin: String,
        #[source]
        source: UnknownRole,
    },

    #[error("{origin}: at least one role must be allowed to create assets")]
    NoCreateRoles { origin: String },

    #[error("data file path must not be empty")]
    EmptyDataFile,
}

/// Complete host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// File backing the key-value store.
    pub data_file: PathBuf,
    /// Log filter directive.
    pub log_filter: String,
    /// Roles permitted to call `createAsset`.
    pub create_roles: Vec<Role>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            create_roles: vec![Role::Regulator],
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_FILE_VAR) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }
        if let Some(roles) = lookup(CREATE_ROLES_VAR) {
            config.create_roles = parse_roles(CREATE_ROLES_VAR, &roles)?;
        }

        Ok(config)
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_create_roles(mut self, roles: Vec<Role>) -> Self {
        self.create_roles = roles;
        self
    }

    /// Check the configuration before opening the store.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }
        if self.create_roles.is_empty() {
            return Err(ConfigError::NoCreateRoles {
                origin: "create roles".to_string(),
            });
        }
        Ok(())
    }

    /// Ledger configuration with `createAsset` limited to `create_roles`.
    pub fn ledger_config(&self) -> LedgerConfig {
        let permissions = PermissionTable::unrestricted()
            .restrict(Operation::CreateAsset, self.create_roles.iter().cloned());
        LedgerConfig::default().with_permissions(permissions)
    }
}

/// Parse a comma-separated role list. Only the four named roles are accepted.
pub fn parse_roles(origin: &str, value: &str) -> Result<Vec<Role>, ConfigError> {
    let mut roles = Vec::new();

    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let role: Role = part.parse().map_err(|source| ConfigError::UnknownRole {
            origin: origin.to_string(),
            source,
        })?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }

    if roles.is_empty() {
        return Err(ConfigError::NoCreateRoles {
            origin: origin.to_string(),
        });
    }

    Ok(roles)
}
