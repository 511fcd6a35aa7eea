//! # Ports Layer
//!
//! - `inbound.rs` - Driving port (the invocation API exposed to the host)
//! - `outbound.rs` - Driven ports (key-value store, execution context)

pub mod inbound;
pub mod outbound;
