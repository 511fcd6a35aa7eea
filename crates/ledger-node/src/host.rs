//! # Ledger Host
//!
//! Owns one ledger and serializes every invocation against it. The mutex is
//! the only concurrency control: at most one invocation touches the store at
//! a time, in the order callers acquire the lock.
//!
//! Invocation logs are JSON lines, one [`Invocation`] per line:
//!
//! ```text
//! {"entry":"init","args":["alice","certA"]}
//! {"entry":"invoke","user":"reg","role":"regulator","operation":"createAsset","args":["C1","Gold","1","alice"]}
//! {"entry":"query","user":"dave","role":"user","operation":"getBalance","args":["C1","alice"]}
//! ```

use crate::config::NodeConfig;
use asset_ledger::domain::{ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE};
use asset_ledger::{
    AssetLedger, AssetLedgerApi, FileBackedKVStore, KVStoreError, KeyValueStore, LedgerError,
    StaticContext,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use thiserror::Error;
use tracing::{error, info, warn};

/// Host-level failures, separate from ledger outcomes.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to open ledger store: {0}")]
    Storage(#[from] KVStoreError),

    #[error("failed to read invocation log: {0}")]
    Io(#[from] std::io::Error),
}

/// Which entry an [`Invocation`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entry {
    Init,
    Invoke,
    Query,
}

/// One host call, as recorded in an invocation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub entry: Entry,
    /// Absent attributes stay absent from the execution context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ignored for `init`.
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn init(args: Vec<String>) -> Self {
        Self {
            entry: Entry::Init,
            user: None,
            role: None,
            operation: String::new(),
            args,
        }
    }

    pub fn call(
        entry: Entry,
        user: impl Into<String>,
        role: impl Into<String>,
        operation: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            entry,
            user: Some(user.into()),
            role: Some(role.into()),
            operation: operation.into(),
            args,
        }
    }

    /// Execution context carrying whichever caller attributes are present.
    pub fn context(&self) -> StaticContext {
        let mut context = StaticContext::new();
        if let Some(user) = &self.user {
            context = context.with_attribute(USERNAME_ATTRIBUTE, user.as_str());
        }
        if let Some(role) = &self.role {
            context = context.with_attribute(ROLE_ATTRIBUTE, role.as_str());
        }
        context
    }
}

/// Outcome of one replayed log line.
#[derive(Debug)]
pub enum Outcome {
    Succeeded(Vec<u8>),
    Failed(LedgerError),
    /// The line was not a valid invocation.
    Malformed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    /// The ledger or its store failed, rather than the caller or the log line.
    pub fn is_ledger_fault(&self) -> bool {
        matches!(self, Outcome::Failed(e) if !e.is_caller_error())
    }
}

#[derive(Debug)]
pub struct ReplayRecord {
    /// 1-based line number in the log.
    pub line: usize,
    pub outcome: Outcome,
}

/// A ledger behind a lock.
pub struct LedgerHost<KV>
where
    KV: KeyValueStore,
{
    ledger: Mutex<AssetLedger<KV>>,
}

impl LedgerHost<FileBackedKVStore> {
    /// Open the file-backed store named by `config`.
    pub fn open(config: &NodeConfig) -> Result<Self, HostError> {
        let store = FileBackedKVStore::open(&config.data_file)?;
        info!(
            "[ledger-node] Opened ledger at {} ({} keys)",
            config.data_file.display(),
            store.len()
        );
        Ok(Self::new(AssetLedger::new(store, config.ledger_config())))
    }
}

impl<KV> LedgerHost<KV>
where
    KV: KeyValueStore,
{
    pub fn new(ledger: AssetLedger<KV>) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    /// Run one invocation to completion.
    pub fn execute(&self, invocation: &Invocation) -> Result<Vec<u8>, LedgerError> {
        let mut ledger = self.ledger.lock();

        match invocation.entry {
            Entry::Init => ledger.init(&invocation.args).map(|()| Vec::new()),
            Entry::Invoke => ledger.invoke(
                &invocation.context(),
                &invocation.operation,
                &invocation.args,
            ),
            Entry::Query => ledger.query(
                &invocation.context(),
                &invocation.operation,
                &invocation.args,
            ),
        }
    }

    /// Catalog ids in creation order.
    pub fn catalog(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self.ledger.lock().load_catalog()?.ids().to_vec())
    }

    /// Apply every invocation in `log`, in order.
    ///
    /// A failing or malformed line is recorded and replay moves on; only a
    /// read error on the log itself stops it.
    pub fn replay<R: BufRead>(&self, log: R) -> Result<Vec<ReplayRecord>, HostError> {
        let mut records = Vec::new();

        for (index, line) in log.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let outcome = match serde_json::from_str::<Invocation>(&line) {
                Ok(invocation) => match self.execute(&invocation) {
                    Ok(bytes) => Outcome::Succeeded(bytes),
                    Err(e) => Outcome::Failed(e),
                },
                Err(e) => Outcome::Malformed(e.to_string()),
            };

            if outcome.is_ledger_fault() {
                error!("[ledger-node] Log line {} failed in the ledger: {:?}", index + 1, outcome);
            } else if !outcome.is_success() {
                warn!("[ledger-node] Log line {} did not apply: {:?}", index + 1, outcome);
            }
            records.push(ReplayRecord {
                line: index + 1,
                outcome,
            });
        }

        let applied = records.iter().filter(|r| r.outcome.is_success()).count();
        let faults = records.iter().filter(|r| r.outcome.is_ledger_fault()).count();
        info!(
            "[ledger-node] Replayed {} invocation(s), {} succeeded, {} ledger fault(s)",
            records.len(),
            applied,
            faults
        );

        Ok(records)
    }

    pub fn into_ledger(self) -> AssetLedger<KV> {
        self.ledger.into_inner()
    }
}
