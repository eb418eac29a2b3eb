//! Telemetry event types
//!
//! A [`CircuitEvent`] is one parsed sample from the circuit breaker
//! telemetry stream. Every field the feed publishes may be absent or null;
//! absent and null are equivalent and never an error.

use serde::Deserialize;

/// Placeholder used in summaries and log lines when a sample carries no
/// circuit name.
pub const UNKNOWN_BREAKER: &str = "Unknown Breaker";

/// One parsed circuit breaker telemetry sample.
///
/// Constructed per incoming payload and discarded after evaluation.
/// Unrecognized wire fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CircuitEvent {
    /// Circuit identifier
    #[serde(default)]
    pub name: Option<String>,

    /// Circuit is manually held open regardless of health
    #[serde(rename = "propertyValue_circuitBreakerForceOpen", default)]
    pub force_open: Option<bool>,

    /// Circuit tripped open due to detected failures
    #[serde(rename = "isCircuitBreakerOpen", default)]
    pub circuit_open: Option<bool>,

    /// Error count reported for the circuit
    #[serde(rename = "errorCount", default)]
    pub error_count: Option<i64>,
}

impl CircuitEvent {
    /// Circuit name for display in summaries and log lines, substituting a
    /// placeholder when the sample carried none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_BREAKER)
    }

    /// Whether the circuit is forced open.
    pub fn is_forced_open(&self) -> bool {
        self.force_open.unwrap_or(false)
    }

    /// Whether the circuit is short circuited.
    pub fn is_short_circuited(&self) -> bool {
        self.circuit_open.unwrap_or(false)
    }

    /// Whether the sample reports a positive error count.
    pub fn has_errors(&self) -> bool {
        self.error_count.is_some_and(|count| count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload_deserialization() {
        let payload = r#"{
            "name": "orders-svc",
            "propertyValue_circuitBreakerForceOpen": false,
            "isCircuitBreakerOpen": true,
            "errorCount": 12,
            "requestCount": 4096,
            "latencyExecute_mean": 17
        }"#;

        let event: CircuitEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.name.as_deref(), Some("orders-svc"));
        assert!(!event.is_forced_open());
        assert!(event.is_short_circuited());
        assert!(event.has_errors());
    }

    #[test]
    fn test_missing_and_null_fields_are_absent() {
        let event: CircuitEvent =
            serde_json::from_str(r#"{"name": null, "errorCount": null}"#).unwrap();
        assert_eq!(event.name, None);
        assert_eq!(event.error_count, None);
        assert!(!event.is_forced_open());
        assert!(!event.is_short_circuited());
        assert!(!event.has_errors());
    }

    #[test]
    fn test_display_name_placeholder() {
        let event = CircuitEvent::default();
        assert_eq!(event.display_name(), UNKNOWN_BREAKER);

        let named = CircuitEvent {
            name: Some("payments-svc".to_string()),
            ..Default::default()
        };
        assert_eq!(named.display_name(), "payments-svc");
    }

    #[test]
    fn test_zero_error_count_is_not_errors() {
        let event: CircuitEvent = serde_json::from_str(r#"{"errorCount": 0}"#).unwrap();
        assert!(!event.has_errors());
    }
}
