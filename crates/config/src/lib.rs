//! Configuration management for Circuit Notifier

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Key in the components map whose label is stamped on every alert.
pub const PRIMARY_COMPONENT_KEY: &str = "one";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main notifier configuration
///
/// Loaded once at process start and immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Telemetry stream connection
    pub stream: StreamSettings,

    /// Incident endpoint connection
    pub zenoss: ZenossSettings,

    /// Circuit names excluded from alerting
    pub blacklist: Vec<String>,

    /// Component labels keyed by name; the `one` entry is applied to alerts
    pub components: HashMap<String, String>,

    /// Observability settings
    pub observability: ObservabilityConfig,
}

impl NotifierConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        // Override with environment variables (prefixed with NOTIFIER_)
        figment = figment.merge(Env::prefixed("NOTIFIER_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.stream.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "Stream URL required".to_string(),
            ));
        }

        if self.zenoss.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "Zenoss endpoint required".to_string(),
            ));
        }

        if self.zenoss.username.is_empty() {
            return Err(ConfigError::ValidationError(
                "Zenoss username required".to_string(),
            ));
        }

        if !self.components.contains_key(PRIMARY_COMPONENT_KEY) {
            return Err(ConfigError::ValidationError(format!(
                "Components map must contain the '{}' label",
                PRIMARY_COMPONENT_KEY
            )));
        }

        Ok(())
    }

    /// Component label applied to every alert.
    ///
    /// Only valid after [`validate`](Self::validate) has passed.
    pub fn primary_component(&self) -> Result<&str> {
        self.components
            .get(PRIMARY_COMPONENT_KEY)
            .map(String::as_str)
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "Components map must contain the '{}' label",
                    PRIMARY_COMPONENT_KEY
                ))
            })
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            stream: StreamSettings::default(),
            zenoss: ZenossSettings::default(),
            blacklist: Vec::new(),
            components: HashMap::from([(
                PRIMARY_COMPONENT_KEY.to_string(),
                "circuit-breaker".to_string(),
            )]),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Telemetry stream settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Stream endpoint URL
    pub url: String,

    /// Delay between reconnect attempts in seconds
    pub reconnect_delay_secs: u64,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081/hystrix.stream".to_string(),
            reconnect_delay_secs: 5,
            connect_timeout_secs: 10,
        }
    }
}

/// Incident endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZenossSettings {
    /// Full event router URL, including path
    pub endpoint: String,

    /// Basic auth username
    pub username: String,

    /// Basic auth password
    pub password: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ZenossSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/zport/dmd/evconsole_router".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,

    /// Enable structured JSON logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}
