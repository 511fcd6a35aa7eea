//! # Authorization Gate
//!
//! Roles and the permission table consulted before an operation executes.
//!
//! The table maps an [`Operation`] to the set of roles allowed to run it.
//! Operations with no entry are unrestricted. The default table restricts
//! `createAsset` to the regulator and leaves everything else open; hosts
//! extend it through configuration.

use super::errors::LedgerError;
use super::operations::Operation;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Role carried in the caller's credential.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Issuing authority; the only role allowed to create assets by default.
    Regulator,
    Subscriber,
    Private,
    User,
    /// Any role string this ledger does not know. Never matches a grant
    /// unless a host grants that exact string.
    Unrecognized(String),
}

impl Role {
    /// Map a role attribute to a [`Role`], keeping unknown strings as
    /// [`Role::Unrecognized`] instead of failing.
    pub fn from_attribute(value: &str) -> Self {
        value
            .parse()
            .unwrap_or_else(|_| Role::Unrecognized(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Regulator => "regulator",
            Role::Subscriber => "subscriber",
            Role::Private => "private",
            Role::User => "user",
            Role::Unrecognized(value) => value,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a role name that is not one of the four named roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regulator" => Ok(Role::Regulator),
            "subscriber" => Ok(Role::Subscriber),
            "private" => Ok(Role::Private),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Operation → permitted roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    restricted: BTreeMap<Operation, BTreeSet<Role>>,
}

impl PermissionTable {
    /// A table with no restrictions at all.
    pub fn unrestricted() -> Self {
        Self {
            restricted: BTreeMap::new(),
        }
    }

    /// Restrict `operation` to exactly `roles`, replacing any previous set.
    /// An empty set denies the operation to everyone.
    pub fn restrict(mut self, operation: Operation, roles: impl IntoIterator<Item = Role>) -> Self {
        self.restricted
            .insert(operation, roles.into_iter().collect());
        self
    }

    /// Add `role` to the permitted set of an already restricted operation.
    /// Granting on an unrestricted operation changes nothing.
    pub fn grant(mut self, operation: Operation, role: Role) -> Self {
        if let Some(roles) = self.restricted.get_mut(&operation) {
            roles.insert(role);
        }
        self
    }

    /// Remove any restriction on `operation`.
    pub fn open(mut self, operation: Operation) -> Self {
        self.restricted.remove(&operation);
        self
    }

    /// `None` when the operation is unrestricted.
    pub fn permitted_roles(&self, operation: Operation) -> Option<&BTreeSet<Role>> {
        self.restricted.get(&operation)
    }

    pub fn is_permitted(&self, operation: Operation, role: &Role) -> bool {
        match self.restricted.get(&operation) {
            Some(roles) => roles.contains(role),
            None => true,
        }
    }

    /// Check `role` against the table.
    pub fn authorize(&self, operation: Operation, role: &Role) -> Result<(), LedgerError> {
        if self.is_permitted(operation, role) {
            Ok(())
        } else {
            Err(LedgerError::PermissionDenied {
                operation: operation.name(),
                role: role.clone(),
            })
        }
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::unrestricted().restrict(Operation::CreateAsset, [Role::Regulator])
    }
}
