//! # Asset Record Store
//!
//! Asset records keyed by id, plus the raw credential entries seeded at
//! bootstrap. Authorization is the router's job; nothing here checks roles.

use super::*;
use crate::domain::entities::Asset;
use crate::domain::errors::{LedgerError, RecordKind};

impl<KV> AssetLedger<KV>
where
    KV: KeyValueStore,
{
    /// Read and decode the asset stored at `id`.
    pub fn get_asset(&self, id: &str) -> Result<Asset, LedgerError> {
        self.load_record(RecordKind::Asset, id)
    }

    /// Issue a new asset with no holders.
    ///
    /// Fails with `InvalidArguments` for an empty id or one equal to the
    /// catalog key, and with `AlreadyExists` if any entry is stored at `id`.
    pub fn create_asset(
        &mut self,
        id: &str,
        name: &str,
        kind: i64,
        owner: &str,
    ) -> Result<Asset, LedgerError> {
        self.validate_asset_id(id)?;

        if self.key_exists(RecordKind::Asset, id)? {
            return Err(LedgerError::AlreadyExists {
                record: RecordKind::Asset,
                key: id.to_string(),
            });
        }

        let asset = Asset::new(id, name, kind, owner);
        self.save_asset(&asset)?;
        Ok(asset)
    }

    /// Overwrite the stored record at `asset.id`.
    pub fn save_asset(&mut self, asset: &Asset) -> Result<(), LedgerError> {
        self.store_record(RecordKind::Asset, &asset.id, asset)
    }

    /// Raw credential blob seeded for `name`.
    pub fn get_credential(&self, name: &str) -> Result<Vec<u8>, LedgerError> {
        self.read_key(RecordKind::Credential, name)?
            .ok_or_else(|| LedgerError::NotFound {
                record: RecordKind::Credential,
                key: name.to_string(),
            })
    }

    pub(crate) fn put_credential(&mut self, name: &str, blob: &[u8]) -> Result<(), LedgerError> {
        self.write_key(RecordKind::Credential, name, blob)
    }

    fn validate_asset_id(&self, id: &str) -> Result<(), LedgerError> {
        if id.is_empty() {
            return Err(LedgerError::invalid_arguments(
                "createAsset",
                "asset id must not be empty",
            ));
        }
        if id == self.config.catalog_key {
            return Err(LedgerError::invalid_arguments(
                "createAsset",
                format!("asset id '{id}' is reserved"),
            ));
        }
        Ok(())
    }
}
