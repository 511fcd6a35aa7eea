//! # Ledger Node
//!
//! Reference host for the asset ledger. It supplies what the state machine
//! leaves to its environment: a durable store, caller attributes for each
//! invocation, and a strict one-at-a-time ordering of invocations.
//!
//! ## Modules
//!
//! - `config` - Layered host configuration (defaults, environment, flags)
//! - `host` - `LedgerHost` and the JSON-lines invocation log

pub mod config;
pub mod host;

pub use config::{ConfigError, NodeConfig};
pub use host::{Entry, HostError, Invocation, LedgerHost, Outcome, ReplayRecord};
