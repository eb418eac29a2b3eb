//! Zenoss EventsRouter client

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use circuit_notifier_types::{AlertRequest, AlertSink};

use super::types::{EventsRouterRequest, ZenossConfig};

/// Zenoss API client
#[derive(Clone)]
pub struct ZenossClient {
    /// HTTP client
    client: reqwest::Client,
    /// Configuration
    config: ZenossConfig,
}

impl ZenossClient {
    /// Create a new Zenoss client.
    pub fn new(config: ZenossConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("circuit-notifier/0.1")
            .build()
            .context("Failed to create HTTP client")?;

        info!("Initialized Zenoss client for: {}", config.endpoint);

        Ok(Self { client, config })
    }
}

#[async_trait]
impl AlertSink for ZenossClient {
    /// Deliver one alert as an `add_event` call.
    ///
    /// Delivery is best-effort: transport failures and non-2xx responses are
    /// returned so the caller may log them, but no retry is attempted and
    /// the response body is never inspected on success.
    async fn send_alert(&self, alert: &AlertRequest) -> Result<()> {
        let payload = EventsRouterRequest::add_event(alert);

        debug!("Delivering alert: {}", alert.summary);

        let response = self
            .client
            .post(&self.config.endpoint)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&payload)
            .send()
            .await
            .context("Failed to send alert request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Zenoss API error ({}): {}", status, body);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = ZenossClient::new(ZenossConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_config_default_timeout_is_bounded() {
        let config = ZenossConfig::default();
        assert_eq!(config.timeout_secs, 30);
    }
}
