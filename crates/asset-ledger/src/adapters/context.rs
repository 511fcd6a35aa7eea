//! Execution-context adapters.

use crate::domain::errors::ContextError;
use crate::domain::value_objects::{ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE};
use crate::ports::outbound::ExecutionContext;
use std::collections::BTreeMap;

/// Execution context backed by a fixed attribute map.
///
/// Used by hosts that authenticate the caller themselves and by tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticContext {
    attributes: BTreeMap<String, Vec<u8>>,
}

impl StaticContext {
    /// A context with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context carrying `username` and `role`.
    pub fn for_caller(username: &str, role: &str) -> Self {
        Self::new()
            .with_attribute(USERNAME_ATTRIBUTE, username)
            .with_attribute(ROLE_ATTRIBUTE, role)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn without_attribute(mut self, name: &str) -> Self {
        self.attributes.remove(name);
        self
    }
}

impl ExecutionContext for StaticContext {
    fn read_attribute(&self, name: &str) -> Result<Vec<u8>, ContextError> {
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| ContextError::MissingAttribute(name.to_string()))
    }
}

/// Context for hosts that cannot read credential attributes at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributeContext;

impl ExecutionContext for NoAttributeContext {
    fn read_attribute(&self, _name: &str) -> Result<Vec<u8>, ContextError> {
        Err(ContextError::Unsupported)
    }
}
