//! Zenoss API types

use circuit_notifier_types::{AlertRequest, Severity};
use serde::Serialize;

/// Event class assigned to every event the notifier raises.
pub const EVENT_CLASS: &str = "/APP";

/// Zenoss connection configuration
#[derive(Debug, Clone)]
pub struct ZenossConfig {
    /// Full event router URL, including path
    pub endpoint: String,
    /// Basic auth username
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ZenossConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/zport/dmd/evconsole_router".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

/// One event inside an EventsRouter call
#[derive(Debug, Clone, Serialize)]
pub struct ZenossEvent {
    /// Human-readable description of the condition
    pub summary: String,
    /// Affected device; null when the triggering sample carried no name
    pub device: Option<String>,
    /// Component label
    pub component: String,
    /// Event severity
    pub severity: Severity,
    /// Event class key; always empty for notifier events
    pub evclasskey: &'static str,
    /// Event class; always [`EVENT_CLASS`]
    pub evclass: &'static str,
}

/// EventsRouter JSON-RPC envelope
#[derive(Debug, Clone, Serialize)]
pub struct EventsRouterRequest {
    /// Router action
    pub action: &'static str,
    /// Router method
    pub method: &'static str,
    /// Event list; always exactly one event per call
    pub data: Vec<ZenossEvent>,
    /// Call type
    #[serde(rename = "type")]
    pub call_type: &'static str,
    /// Transaction id
    pub tid: &'static str,
}

impl EventsRouterRequest {
    /// Build an `add_event` call for one alert.
    pub fn add_event(alert: &AlertRequest) -> Self {
        Self {
            action: "EventsRouter",
            method: "add_event",
            data: vec![ZenossEvent {
                summary: alert.summary.clone(),
                device: alert.device.clone(),
                component: alert.component.clone(),
                severity: alert.severity,
                evclasskey: "",
                evclass: EVENT_CLASS,
            }],
            call_type: "rpc",
            tid: "1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_event_wire_format() {
        let alert = AlertRequest::new(
            "The circuit breaker for orders-svc is short circuited",
            Some("orders-svc".to_string()),
            "backend",
            Severity::Critical,
        );

        let request = EventsRouterRequest::add_event(&alert);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "action": "EventsRouter",
                "method": "add_event",
                "data": [{
                    "summary": "The circuit breaker for orders-svc is short circuited",
                    "device": "orders-svc",
                    "component": "backend",
                    "severity": "Critical",
                    "evclasskey": "",
                    "evclass": "/APP"
                }],
                "type": "rpc",
                "tid": "1"
            })
        );
    }

    #[test]
    fn test_missing_device_serializes_as_null() {
        let alert = AlertRequest::new(
            "The circuit breaker for Unknown Breaker is forced open",
            None,
            "backend",
            Severity::Critical,
        );

        let body = serde_json::to_value(EventsRouterRequest::add_event(&alert)).unwrap();
        assert!(body["data"][0]["device"].is_null());
    }

    #[test]
    fn test_error_severity_wire_format() {
        let alert = AlertRequest::new(
            "There are errors on orders-svc",
            Some("orders-svc".to_string()),
            "backend",
            Severity::Error,
        );

        let body = serde_json::to_value(EventsRouterRequest::add_event(&alert)).unwrap();
        assert_eq!(body["data"][0]["severity"], "Error");
    }
}
