//! # Domain Entities
//!
//! Persisted records (`Asset`, `Catalog`) and the per-invocation
//! `CallerContext`.
//!
//! Field names on the wire follow the ledger's existing JSON layout
//! (`currid`, `ctype`, `ids`), so records written by earlier deployments
//! remain readable. Those deployments encode an empty `balances` map or
//! `ids` list as `null`; both decode as empty here.

use super::authorization::Role;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Holder identity → amount.
///
/// Ordered so the serialized record is byte-identical on every replica.
pub type Balances = BTreeMap<String, f64>;

/// One fungible instrument and the balances held in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Globally unique, fixed at creation.
    #[serde(rename = "currid")]
    pub id: String,
    pub name: String,
    /// Category code.
    #[serde(rename = "ctype")]
    pub kind: i64,
    pub owner: String,
    /// A holder with no entry has a zero balance.
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub balances: Balances,
}

impl Asset {
    /// A freshly issued asset with no holders.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: i64,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            owner: owner.into(),
            balances: Balances::new(),
        }
    }
}

/// Append-only sequence of every asset id created so far, in creation order.
///
/// Entries are never removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    ids: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }
}

/// Identity and role of the invocation's originator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    pub identity: String,
    pub role: Role,
}

/// Result payload of a balance query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub identity: String,
    pub balance: f64,
}

/// A present field holding `null` is the empty collection. A missing field
/// is still an error.
fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
