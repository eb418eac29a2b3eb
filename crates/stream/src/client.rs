//! Long-lived telemetry stream connection
//!
//! [`StreamClient`] holds the SSE connection open for the process lifetime,
//! delivering lifecycle notifications and raw payloads to a
//! [`StreamHandler`]. Disconnects are reported through the handler and
//! followed by a reconnect after a fixed delay; there is no cancellation
//! path.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use crate::sse::FrameBuffer;

/// SSE event type the feed uses for periodic clock notifications.
const TIME_EVENT: &str = "time";

/// Stream error types
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Stream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Stream responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Stream closed by server")]
    Closed,
}

/// Stream connection configuration
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Stream endpoint URL
    pub url: String,
    /// Delay between reconnect attempts
    pub reconnect_delay: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081/hystrix.stream".to_string(),
            reconnect_delay: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Stream event handler trait
///
/// Receives connection lifecycle notifications and raw message payloads.
/// Handlers must never assume a notification order beyond: one `on_open`
/// per established connection, followed by messages until the next
/// `on_error`.
#[async_trait]
pub trait StreamHandler: Send + Sync {
    /// A connection to the feed was established.
    async fn on_open(&self);

    /// A message frame arrived; `data` is the raw payload, unparsed.
    async fn on_message(&self, data: &str);

    /// A periodic time notification arrived.
    async fn on_time(&self, _data: &str) {}

    /// The connection failed or closed; a reconnect follows.
    async fn on_error(&self, error: &StreamError);
}

/// Telemetry stream client
pub struct StreamClient {
    /// HTTP client
    client: reqwest::Client,
    /// Configuration
    config: StreamConfig,
}

impl StreamClient {
    /// Create a new stream client.
    ///
    /// Only connection establishment is bounded by a timeout; the streaming
    /// response itself must be allowed to live indefinitely.
    pub fn new(config: StreamConfig) -> Result<Self, StreamError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent("circuit-notifier/0.1")
            .build()?;

        Ok(Self { client, config })
    }

    /// Consume the stream indefinitely, reconnecting after every disconnect.
    ///
    /// Never returns; the connection is intended to live for the process
    /// lifetime.
    pub async fn run(&self, handler: Arc<dyn StreamHandler>) {
        loop {
            if let Err(error) = self.connect_once(handler.as_ref()).await {
                handler.on_error(&error).await;
            }

            debug!(
                "Reconnecting to {} in {:?}",
                self.config.url, self.config.reconnect_delay
            );
            sleep(self.config.reconnect_delay).await;
        }
    }

    /// Open one connection and consume it until it drops.
    ///
    /// Returns the error that ended the connection; a server-side close is
    /// reported as [`StreamError::Closed`] so every reconnect cycle is
    /// visible to the handler.
    async fn connect_once(&self, handler: &dyn StreamHandler) -> Result<(), StreamError> {
        let mut response = self
            .client
            .get(&self.config.url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StreamError::Status { status, body });
        }

        handler.on_open().await;

        let mut buffer = FrameBuffer::new();
        while let Some(chunk) = response.chunk().await? {
            let text = String::from_utf8_lossy(&chunk);
            for frame in buffer.push(&text) {
                match frame.event.as_deref() {
                    Some(TIME_EVENT) => handler.on_time(&frame.data).await,
                    _ if !frame.data.is_empty() => handler.on_message(&frame.data).await,
                    _ => {}
                }
            }
        }

        Err(StreamError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_config_default() {
        let config = StreamConfig::default();
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = StreamClient::new(StreamConfig::default());
        assert!(client.is_ok());
    }
}
