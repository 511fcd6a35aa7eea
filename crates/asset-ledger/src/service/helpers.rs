//! # Store Access Helpers
//!
//! Every read and write goes through here so failures carry the record kind
//! and key they concern.

use super::*;
use crate::domain::errors::{LedgerError, RecordKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

impl<KV> AssetLedger<KV>
where
    KV: KeyValueStore,
{
    pub(crate) fn read_key(
        &self,
        record: RecordKind,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        self.kv_store
            .get(key.as_bytes())
            .map_err(|source| LedgerError::PersistenceError {
                record,
                key: key.to_string(),
                source,
            })
    }

    pub(crate) fn key_exists(&self, record: RecordKind, key: &str) -> Result<bool, LedgerError> {
        self.kv_store
            .exists(key.as_bytes())
            .map_err(|source| LedgerError::PersistenceError {
                record,
                key: key.to_string(),
                source,
            })
    }

    pub(crate) fn write_key(
        &mut self,
        record: RecordKind,
        key: &str,
        value: &[u8],
    ) -> Result<(), LedgerError> {
        self.kv_store
            .put(key.as_bytes(), value)
            .map_err(|source| LedgerError::PersistenceError {
                record,
                key: key.to_string(),
                source,
            })
    }

    /// Read and decode the record at `key`; `NotFound` when absent.
    pub(crate) fn load_record<T: DeserializeOwned>(
        &self,
        record: RecordKind,
        key: &str,
    ) -> Result<T, LedgerError> {
        let bytes = self
            .read_key(record, key)?
            .ok_or_else(|| LedgerError::NotFound {
                record,
                key: key.to_string(),
            })?;
        decode(record, key, &bytes)
    }

    /// Encode `value` and write it at `key`.
    pub(crate) fn store_record<T: Serialize>(
        &mut self,
        record: RecordKind,
        key: &str,
        value: &T,
    ) -> Result<(), LedgerError> {
        let bytes = encode(record, key, value)?;
        self.write_key(record, key, &bytes)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    record: RecordKind,
    key: &str,
    bytes: &[u8],
) -> Result<T, LedgerError> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::Corrupt {
        record,
        key: key.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn encode<T: Serialize>(
    record: RecordKind,
    key: &str,
    value: &T,
) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(value).map_err(|e| LedgerError::Corrupt {
        record,
        key: key.to_string(),
        reason: format!("failed to encode: {e}"),
    })
}
