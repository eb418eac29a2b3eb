//! # Circuit Notifier - Integrations
//!
//! Clients for the external services the notifier talks to.
//!
//! ## Zenoss Integration
//!
//! - EventsRouter `add_event` calls with the fixed `/APP` event class
//! - Basic authentication
//! - Bounded request timeout
//! - Best-effort delivery: errors are reported to the caller, never retried
//!
//! ## Example
//!
//! ```no_run
//! use circuit_notifier_integrations::zenoss::{ZenossClient, ZenossConfig};
//! use circuit_notifier_types::{AlertRequest, AlertSink, Severity};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ZenossConfig {
//!     endpoint: "https://zenoss.example.com/zport/dmd/evconsole_router".to_string(),
//!     username: "svc-notifier".to_string(),
//!     password: "secret".to_string(),
//!     timeout_secs: 30,
//! };
//!
//! let client = ZenossClient::new(config)?;
//! let alert = AlertRequest::new(
//!     "The circuit breaker for orders-svc is short circuited",
//!     Some("orders-svc".to_string()),
//!     "backend",
//!     Severity::Critical,
//! );
//! client.send_alert(&alert).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Zenoss EventsRouter integration
pub mod zenoss;

pub use zenoss::{ZenossClient, ZenossConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
