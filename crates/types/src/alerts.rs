//! Outbound alert types
//!
//! An [`AlertRequest`] is one alert-worthy condition observed on a circuit,
//! ready to be delivered to the incident endpoint. The [`AlertSink`] trait is
//! the seam between condition evaluation and delivery, so tests can record
//! alerts in-process instead of performing network calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Alert severity, serialized exactly as the incident endpoint expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    /// Circuit is open (forced or tripped); calls are being blocked
    Critical,
    /// Circuit is reporting errors but still passing calls
    Error,
}

impl Severity {
    /// Severity as the string the incident endpoint expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Error => "Error",
        }
    }
}

/// One outbound alert.
///
/// Constructed by the evaluator and consumed immediately by the sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertRequest {
    /// Human-readable description of the condition
    pub summary: String,
    /// Circuit name; `None` when the triggering sample carried no name
    pub device: Option<String>,
    /// Component label from configuration
    pub component: String,
    /// Alert severity
    pub severity: Severity,
}

impl AlertRequest {
    /// Create a new alert request.
    pub fn new(
        summary: impl Into<String>,
        device: Option<String>,
        component: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            summary: summary.into(),
            device,
            component: component.into(),
            severity,
        }
    }
}

/// Alert delivery seam.
///
/// Delivery is best-effort: implementations report failure so callers may
/// log it, but callers never retry.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert to the incident endpoint.
    async fn send_alert(&self, alert: &AlertRequest) -> anyhow::Result<()>;
}
