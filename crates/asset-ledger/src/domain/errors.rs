//! # Domain Errors
//!
//! Error types for the asset ledger.
//!
//! Every failure is terminal for the invocation that raised it and is handed
//! back to the caller unchanged. Each variant carries the operation or the
//! key involved so the failure is actionable without a log lookup.

use super::authorization::Role;
use super::operations::EntryPoint;
use std::fmt;
use thiserror::Error;

/// The kind of persisted record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Asset,
    Catalog,
    Credential,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Asset => write!(f, "asset"),
            RecordKind::Catalog => write!(f, "catalog"),
            RecordKind::Credential => write!(f, "credential"),
        }
    }
}

/// Errors that can occur while handling a ledger invocation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller username or role could not be read from the execution context.
    #[error("caller identity unavailable: {reason}")]
    IdentityUnavailable { reason: String },

    /// Caller role is not in the permitted set for the operation.
    #[error("permission denied for {operation}: role '{role}' is not permitted")]
    PermissionDenied {
        operation: &'static str,
        role: Role,
    },

    /// No record stored at the key.
    #[error("{record} not found: {key}")]
    NotFound { record: RecordKind, key: String },

    /// A record is already stored at the key.
    #[error("{record} already exists: {key}")]
    AlreadyExists { record: RecordKind, key: String },

    /// The stored payload could not be decoded.
    #[error("corrupt {record} record at {key}: {reason}")]
    Corrupt {
        record: RecordKind,
        key: String,
        reason: String,
    },

    /// The key-value store rejected a read or write.
    #[error("persistence failure for {record} at {key}: {source}")]
    PersistenceError {
        record: RecordKind,
        key: String,
        #[source]
        source: KVStoreError,
    },

    /// Operation name was recognized but the arguments were not acceptable.
    #[error("invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        operation: &'static str,
        reason: String,
    },

    /// Operation name is not served by the entry point it was sent to.
    #[error("unknown operation '{operation}' on {entry} entry")]
    UnknownOperation { entry: EntryPoint, operation: String },
}

impl LedgerError {
    /// Returns true if the failure was caused by the caller rather than by
    /// the state of the ledger or the store.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::IdentityUnavailable { .. }
                | Self::PermissionDenied { .. }
                | Self::InvalidArguments { .. }
                | Self::UnknownOperation { .. }
        )
    }

    pub(crate) fn invalid_arguments(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            operation,
            reason: reason.into(),
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// The store refused the operation.
    #[error("KV store rejected operation: {message}")]
    Rejected { message: String },
}

/// Errors raised by the host execution context during attribute lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The context has no value for the attribute.
    #[error("attribute '{0}' is not present")]
    MissingAttribute(String),

    /// The context cannot perform attribute lookups at all.
    #[error("attribute lookup is not supported by this context")]
    Unsupported,
}
