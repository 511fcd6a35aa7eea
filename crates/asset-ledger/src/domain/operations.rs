//! Operation registry for the two invocation entry points.
//!
//! Mutating entry: `createAsset`, `ping`
//! Read-only entry: `getAssetInfo`, `getCredential`, `ping`, `getBalance`

use super::errors::LedgerError;
use std::fmt;

/// The path an invocation arrives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// May write to the store.
    Mutating,
    /// Never writes to the store.
    ReadOnly,
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::Mutating => write!(f, "mutating"),
            EntryPoint::ReadOnly => write!(f, "read-only"),
        }
    }
}

/// Every operation the ledger serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    CreateAsset,
    Ping,
    GetAssetInfo,
    GetCredential,
    GetBalance,
}

/// Operation metadata
#[derive(Debug, Clone, Copy)]
pub struct OperationInfo {
    pub operation: Operation,
    /// Wire name (e.g., "getAssetInfo")
    pub name: &'static str,
    /// Positional parameter names, in order
    pub params: &'static [&'static str],
    /// Entry points that accept this operation
    pub entries: &'static [EntryPoint],
}

impl OperationInfo {
    pub const fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn accepted_on(&self, entry: EntryPoint) -> bool {
        self.entries.contains(&entry)
    }
}

/// Operation registry - all supported operations with metadata
pub static OPERATION_REGISTRY: [OperationInfo; 5] = [
    OperationInfo {
        operation: Operation::CreateAsset,
        name: "createAsset",
        params: &["id", "name", "kind", "owner"],
        entries: &[EntryPoint::Mutating],
    },
    OperationInfo {
        operation: Operation::Ping,
        name: "ping",
        params: &[],
        entries: &[EntryPoint::Mutating, EntryPoint::ReadOnly],
    },
    OperationInfo {
        operation: Operation::GetAssetInfo,
        name: "getAssetInfo",
        params: &["id"],
        entries: &[EntryPoint::ReadOnly],
    },
    OperationInfo {
        operation: Operation::GetCredential,
        name: "getCredential",
        params: &["name"],
        entries: &[EntryPoint::ReadOnly],
    },
    OperationInfo {
        operation: Operation::GetBalance,
        name: "getBalance",
        params: &["id", "holder"],
        entries: &[EntryPoint::ReadOnly],
    },
];

impl Operation {
    pub fn info(self) -> &'static OperationInfo {
        // Registry order matches declaration order.
        &OPERATION_REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Find the operation called `name` on `entry`.
    pub fn lookup(entry: EntryPoint, name: &str) -> Result<Operation, LedgerError> {
        OPERATION_REGISTRY
            .iter()
            .find(|info| info.name == name && info.accepted_on(entry))
            .map(|info| info.operation)
            .ok_or_else(|| LedgerError::UnknownOperation {
                entry,
                operation: name.to_string(),
            })
    }

    /// Reject argument lists whose length differs from the operation's arity.
    pub fn check_arity(self, args: &[String]) -> Result<(), LedgerError> {
        let info = self.info();
        if args.len() != info.arity() {
            return Err(LedgerError::invalid_arguments(
                info.name,
                format!(
                    "expected {} argument(s) ({}), got {}",
                    info.arity(),
                    info.params.join(", "),
                    args.len()
                ),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
