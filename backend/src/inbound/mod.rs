//! Inbound adapters translating external requests into domain service calls.
//!
//! Framework details stay here; handlers in [`http`] only talk to ports.

pub mod http;
