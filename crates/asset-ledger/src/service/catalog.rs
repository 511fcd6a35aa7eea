//! # Asset Catalog
//!
//! The ordered list of every asset id, kept as one record under the
//! configured catalog key.
//!
//! Append happens strictly after the asset record is saved. If the host
//! fails between the two writes the asset exists but is not cataloged; a
//! catalog entry never points at a missing asset.

use super::*;
use crate::domain::entities::Catalog;
use crate::domain::errors::{LedgerError, RecordKind};

impl<KV> AssetLedger<KV>
where
    KV: KeyValueStore,
{
    /// Write an empty catalog.
    ///
    /// Refuses with `AlreadyExists` when a catalog record is present, so a
    /// repeated bootstrap cannot discard existing entries.
    pub fn initialize_catalog(&mut self) -> Result<(), LedgerError> {
        let key = self.config.catalog_key.clone();

        if self.key_exists(RecordKind::Catalog, &key)? {
            return Err(LedgerError::AlreadyExists {
                record: RecordKind::Catalog,
                key,
            });
        }

        self.store_record(RecordKind::Catalog, &key, &Catalog::new())
    }

    /// The current catalog. `NotFound` if the ledger was never initialized.
    pub fn load_catalog(&self) -> Result<Catalog, LedgerError> {
        self.load_record(RecordKind::Catalog, &self.config.catalog_key)
    }

    /// Append `id` to the end of the catalog and return the updated catalog.
    pub fn append_to_catalog(&mut self, id: &str) -> Result<Catalog, LedgerError> {
        let key = self.config.catalog_key.clone();

        let mut catalog: Catalog = self.load_record(RecordKind::Catalog, &key)?;
        catalog.append(id);
        self.store_record(RecordKind::Catalog, &key, &catalog)?;

        Ok(catalog)
    }
}
