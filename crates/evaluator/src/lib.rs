//! Event evaluation and alert dispatch
//!
//! The [`Evaluator`] converts raw stream payloads into [`CircuitEvent`]s and
//! decides which alerts to emit. Three conditions are checked independently
//! per event, so a single sample may produce up to three alerts. Circuits on
//! the blacklist are skipped entirely, and a payload that fails to parse is
//! logged and dropped; nothing in this path can terminate the stream.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};

use circuit_notifier_stream::{StreamError, StreamHandler};
use circuit_notifier_types::{AlertRequest, AlertSink, CircuitEvent, Severity};

/// Evaluator configuration
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Circuit names excluded from alerting
    pub blacklist: HashSet<String>,
    /// Component label stamped on every alert
    pub component: String,
}

impl EvaluatorConfig {
    /// Create a new evaluator configuration.
    pub fn new(
        blacklist: impl IntoIterator<Item = String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            blacklist: blacklist.into_iter().collect(),
            component: component.into(),
        }
    }
}

/// Converts telemetry samples into alerts and hands them to a sink.
pub struct Evaluator {
    /// Configuration
    config: EvaluatorConfig,
    /// Alert delivery sink
    sink: Arc<dyn AlertSink>,
}

impl Evaluator {
    /// Create a new evaluator.
    pub fn new(config: EvaluatorConfig, sink: Arc<dyn AlertSink>) -> Self {
        Self { config, sink }
    }

    /// Decide which alerts a telemetry sample warrants.
    ///
    /// Returns one [`AlertRequest`] per independently-true condition, in a
    /// fixed order: forced open, short circuited, error count. A blacklisted
    /// circuit yields nothing regardless of its field values; a sample with
    /// no name is never considered blacklisted.
    pub fn evaluate(&self, event: &CircuitEvent) -> Vec<AlertRequest> {
        if let Some(name) = &event.name {
            if self.config.blacklist.contains(name) {
                return Vec::new();
            }
        }

        let mut alerts = Vec::new();

        if event.is_forced_open() {
            alerts.push(AlertRequest::new(
                format!(
                    "The circuit breaker for {} is forced open",
                    event.display_name()
                ),
                event.name.clone(),
                &self.config.component,
                Severity::Critical,
            ));
        }

        if event.is_short_circuited() {
            alerts.push(AlertRequest::new(
                format!(
                    "The circuit breaker for {} is short circuited",
                    event.display_name()
                ),
                event.name.clone(),
                &self.config.component,
                Severity::Critical,
            ));
        }

        if event.has_errors() {
            alerts.push(AlertRequest::new(
                format!("There are errors on {}", event.display_name()),
                event.name.clone(),
                &self.config.component,
                Severity::Error,
            ));
        }

        alerts
    }

    /// Blacklist as a stable, comma-separated string for log output.
    fn blacklist_display(&self) -> String {
        let mut names: Vec<&str> = self.config.blacklist.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

#[async_trait]
impl StreamHandler for Evaluator {
    async fn on_open(&self) {
        info!("Connection to the telemetry stream was made");
        info!("Blacklisted circuits: {}", self.blacklist_display());
    }

    async fn on_message(&self, data: &str) {
        let event: CircuitEvent = match serde_json::from_str(data) {
            Ok(event) => event,
            Err(e) => {
                error!("Failed to parse event payload: {} - {}", e, data);
                return;
            }
        };

        for alert in self.evaluate(&event) {
            // One diagnostic line per condition, independent of delivery.
            match alert.severity {
                Severity::Critical => error!("{} ({})", alert.summary, alert.component),
                Severity::Error => warn!("{} ({})", alert.summary, alert.component),
            }

            // Best-effort delivery: failures are logged, never retried.
            if let Err(e) = self.sink.send_alert(&alert).await {
                warn!("Alert delivery failed: {:#}", e);
            }
        }
    }

    async fn on_time(&self, data: &str) {
        info!("The time is {}", data);
    }

    async fn on_error(&self, error: &StreamError) {
        match error {
            StreamError::Status { status, body } => {
                error!("Response status {}, response body {}", status, body);
            }
            other => error!("Stream connection error: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSink;

    #[async_trait]
    impl AlertSink for NullSink {
        async fn send_alert(&self, _alert: &AlertRequest) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn evaluator(blacklist: &[&str]) -> Evaluator {
        let config = EvaluatorConfig::new(
            blacklist.iter().map(|s| s.to_string()),
            "backend",
        );
        Evaluator::new(config, Arc::new(NullSink))
    }

    fn event(payload: &str) -> CircuitEvent {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn test_blacklisted_circuit_yields_nothing() {
        let evaluator = evaluator(&["legacy-svc"]);
        let event = event(
            r#"{"name":"legacy-svc","propertyValue_circuitBreakerForceOpen":true,
                "isCircuitBreakerOpen":true,"errorCount":9}"#,
        );

        assert!(evaluator.evaluate(&event).is_empty());
    }

    #[test]
    fn test_forced_open_is_critical() {
        let evaluator = evaluator(&[]);
        let event = event(r#"{"name":"orders-svc","propertyValue_circuitBreakerForceOpen":true}"#);

        let alerts = evaluator.evaluate(&event);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert!(alerts[0].summary.contains("forced open"));
        assert_eq!(alerts[0].device.as_deref(), Some("orders-svc"));
    }

    #[test]
    fn test_short_circuit_is_critical() {
        let evaluator = evaluator(&[]);
        let event = event(r#"{"name":"orders-svc","isCircuitBreakerOpen":true}"#);

        let alerts = evaluator.evaluate(&event);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert!(alerts[0].summary.contains("short circuited"));
    }

    #[test]
    fn test_error_count_is_error_severity() {
        let evaluator = evaluator(&[]);
        let event = event(r#"{"name":"orders-svc","errorCount":5}"#);

        let alerts = evaluator.evaluate(&event);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Error);
        assert!(alerts[0].summary.contains("errors on"));
    }

    #[test]
    fn test_zero_error_count_yields_nothing() {
        let evaluator = evaluator(&[]);
        let event = event(r#"{"name":"orders-svc","errorCount":0}"#);

        assert!(evaluator.evaluate(&event).is_empty());
    }

    #[test]
    fn test_conditions_are_independent() {
        let evaluator = evaluator(&[]);
        let event = event(
            r#"{"name":"orders-svc","propertyValue_circuitBreakerForceOpen":true,"errorCount":5}"#,
        );

        let alerts = evaluator.evaluate(&event);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[1].severity, Severity::Error);
    }

    #[test]
    fn test_all_three_conditions() {
        let evaluator = evaluator(&[]);
        let event = event(
            r#"{"name":"orders-svc","propertyValue_circuitBreakerForceOpen":true,
                "isCircuitBreakerOpen":true,"errorCount":1}"#,
        );

        assert_eq!(evaluator.evaluate(&event).len(), 3);
    }

    #[test]
    fn test_missing_name_uses_placeholder_and_null_device() {
        let evaluator = evaluator(&["legacy-svc"]);
        let event = event(r#"{"isCircuitBreakerOpen":true}"#);

        let alerts = evaluator.evaluate(&event);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].summary.contains("Unknown Breaker"));
        assert_eq!(alerts[0].device, None);
    }

    #[test]
    fn test_component_label_is_stamped() {
        let evaluator = evaluator(&[]);
        let event = event(r#"{"name":"orders-svc","errorCount":3}"#);

        let alerts = evaluator.evaluate(&event);
        assert_eq!(alerts[0].component, "backend");
    }
}
