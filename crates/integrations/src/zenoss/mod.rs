//! Zenoss EventsRouter integration
//!
//! Delivers alerts to a Zenoss-style incident endpoint as JSON-RPC
//! `add_event` calls.

mod client;
mod types;

pub use client::ZenossClient;
pub use types::{EventsRouterRequest, ZenossConfig, ZenossEvent, EVENT_CLASS};
