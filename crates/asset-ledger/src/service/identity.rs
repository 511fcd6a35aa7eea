//! # Identity Resolver
//!
//! Reads the caller's username and role from the host execution context.

use crate::domain::authorization::Role;
use crate::domain::entities::CallerContext;
use crate::domain::errors::LedgerError;
use crate::domain::value_objects::{ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE};
use crate::ports::outbound::ExecutionContext;

/// Resolve the invoking principal.
///
/// Fails with `IdentityUnavailable` when either attribute is missing, is not
/// UTF-8, or the context cannot look attributes up.
pub fn resolve_caller(context: &dyn ExecutionContext) -> Result<CallerContext, LedgerError> {
    let identity = read_text_attribute(context, USERNAME_ATTRIBUTE)?;
    let role = read_text_attribute(context, ROLE_ATTRIBUTE)?;

    Ok(CallerContext {
        identity,
        role: Role::from_attribute(&role),
    })
}

fn read_text_attribute(context: &dyn ExecutionContext, name: &str) -> Result<String, LedgerError> {
    let raw = context
        .read_attribute(name)
        .map_err(|e| LedgerError::IdentityUnavailable {
            reason: format!("couldn't get attribute '{name}': {e}"),
        })?;

    String::from_utf8(raw).map_err(|_| LedgerError::IdentityUnavailable {
        reason: format!("attribute '{name}' is not valid UTF-8"),
    })
}
