//! # Inbound Ports (Driving Ports)
//!
//! The API the host calls into.

use crate::domain::errors::LedgerError;
use crate::ports::outbound::ExecutionContext;

/// Invocation surface of the asset ledger.
///
/// Both entry points are total over `(operation, args)`: every input yields
/// either result bytes or a [`LedgerError`]. The host is responsible for
/// running at most one invocation at a time and for replaying invocations in
/// the same order on every replica.
pub trait AssetLedgerApi {
    /// Bootstrap a fresh ledger.
    ///
    /// `args` is a flat list of alternating `(username, credential)` pairs.
    /// Writes an empty catalog, then one entry per credential. Fails with
    /// `AlreadyExists` if the ledger was already initialized.
    fn init(&mut self, args: &[String]) -> Result<(), LedgerError>;

    /// Mutating entry: `createAsset`, `ping`.
    fn invoke(
        &mut self,
        context: &dyn ExecutionContext,
        operation: &str,
        args: &[String],
    ) -> Result<Vec<u8>, LedgerError>;

    /// Read-only entry: `getAssetInfo`, `getCredential`, `ping`, `getBalance`.
    fn query(
        &self,
        context: &dyn ExecutionContext,
        operation: &str,
        args: &[String],
    ) -> Result<Vec<u8>, LedgerError>;
}
