//! # Operation Router
//!
//! Implements [`AssetLedgerApi`] for both entry points and bootstrap.
//!
//! Every invocation is admitted in the same order: resolve the caller,
//! look the operation up on the entry point, check arity, then consult the
//! permission table. Only then is the store touched.

use super::helpers::encode;
use super::*;
use crate::domain::balance::balance_report;
use crate::domain::entities::CallerContext;
use crate::domain::errors::{LedgerError, RecordKind};
use crate::domain::operations::{EntryPoint, Operation};
use crate::ports::inbound::AssetLedgerApi;
use crate::ports::outbound::ExecutionContext;

const INIT: &str = "init";

impl<KV> AssetLedgerApi for AssetLedger<KV>
where
    KV: KeyValueStore,
{
    fn init(&mut self, args: &[String]) -> Result<(), LedgerError> {
        if args.len() % 2 != 0 {
            return Err(LedgerError::invalid_arguments(
                INIT,
                format!(
                    "expected (name, credential) pairs, got {} argument(s)",
                    args.len()
                ),
            ));
        }
        for pair in args.chunks_exact(2) {
            let name = &pair[0];
            if name.is_empty() {
                return Err(LedgerError::invalid_arguments(
                    INIT,
                    "credential name must not be empty",
                ));
            }
            if *name == self.config.catalog_key {
                return Err(LedgerError::invalid_arguments(
                    INIT,
                    format!("credential name '{name}' is reserved"),
                ));
            }
        }

        self.initialize_catalog()?;

        for pair in args.chunks_exact(2) {
            self.put_credential(&pair[0], pair[1].as_bytes())?;
        }

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            "[asset-ledger] Ledger initialized with {} credential(s)",
            args.len() / 2
        );

        Ok(())
    }

    fn invoke(
        &mut self,
        context: &dyn ExecutionContext,
        operation: &str,
        args: &[String],
    ) -> Result<Vec<u8>, LedgerError> {
        let (caller, op) = self.admit(EntryPoint::Mutating, context, operation, args)?;

        match op {
            Operation::CreateAsset => self.handle_create_asset(&caller, args),
            Operation::Ping => Ok(self.config.liveness_payload.clone()),
            Operation::GetAssetInfo | Operation::GetCredential | Operation::GetBalance => {
                Err(LedgerError::UnknownOperation {
                    entry: EntryPoint::Mutating,
                    operation: operation.to_string(),
                })
            }
        }
    }

    fn query(
        &self,
        context: &dyn ExecutionContext,
        operation: &str,
        args: &[String],
    ) -> Result<Vec<u8>, LedgerError> {
        let (_caller, op) = self.admit(EntryPoint::ReadOnly, context, operation, args)?;

        match op {
            Operation::GetAssetInfo => {
                let asset = self.get_asset(&args[0])?;
                encode(RecordKind::Asset, &asset.id, &asset)
            }
            Operation::GetCredential => self.get_credential(&args[0]),
            Operation::Ping => Ok(self.config.liveness_payload.clone()),
            Operation::GetBalance => {
                let (id, holder) = (&args[0], &args[1]);
                let asset = self.get_asset(id)?;
                encode(RecordKind::Asset, id, &balance_report(&asset, holder))
            }
            Operation::CreateAsset => Err(LedgerError::UnknownOperation {
                entry: EntryPoint::ReadOnly,
                operation: operation.to_string(),
            }),
        }
    }
}

impl<KV> AssetLedger<KV>
where
    KV: KeyValueStore,
{
    /// Resolve, look up, check arity, authorize.
    fn admit(
        &self,
        entry: EntryPoint,
        context: &dyn ExecutionContext,
        operation: &str,
        args: &[String],
    ) -> Result<(CallerContext, Operation), LedgerError> {
        let caller = resolve_caller(context)?;
        let op = Operation::lookup(entry, operation)?;
        op.check_arity(args)?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!(
            "[asset-ledger] {} {} from {} ({})",
            entry,
            op,
            caller.identity,
            caller.role
        );

        // Liveness stays reachable for every resolved caller.
        if op != Operation::Ping {
            if let Err(e) = self.config.permissions.authorize(op, &caller.role) {
                #[cfg(feature = "tracing-log")]
                tracing::warn!("[asset-ledger] Denied {} to {}: {}", op, caller.identity, e);
                return Err(e);
            }
        }

        Ok((caller, op))
    }

    /// Create the asset, then catalog it.
    fn handle_create_asset(
        &mut self,
        caller: &CallerContext,
        args: &[String],
    ) -> Result<Vec<u8>, LedgerError> {
        let [id, name, kind, owner] = args else {
            return Err(LedgerError::invalid_arguments(
                "createAsset",
                format!("expected 4 argument(s), got {}", args.len()),
            ));
        };

        let kind: i64 = kind.parse().map_err(|_| {
            LedgerError::invalid_arguments(
                "createAsset",
                format!("kind must be an integer, got '{kind}'"),
            )
        })?;

        self.create_asset(id, name, kind, owner)?;

        if let Err(e) = self.append_to_catalog(id) {
            #[cfg(feature = "tracing-log")]
            tracing::warn!(
                "[asset-ledger] Asset {} saved but not cataloged: {}",
                id,
                e
            );
            return Err(e);
        }

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            "[asset-ledger] Asset {} created by {} (owner: {}, kind: {})",
            id,
            caller.identity,
            owner,
            kind
        );
        #[cfg(not(feature = "tracing-log"))]
        let _ = caller;

        Ok(Vec::new())
    }
}
