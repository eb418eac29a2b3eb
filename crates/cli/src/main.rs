//! Circuit Notifier
//!
//! Long-running bridge from a circuit breaker telemetry stream to a
//! Zenoss-style incident endpoint. Runs until externally terminated.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circuit_notifier_config::{NotifierConfig, ObservabilityConfig};
use circuit_notifier_evaluator::{Evaluator, EvaluatorConfig};
use circuit_notifier_integrations::zenoss::{ZenossClient, ZenossConfig};
use circuit_notifier_stream::{StreamClient, StreamConfig};

#[derive(Parser)]
#[command(
    name = "circuit-notifier",
    version,
    about = "Bridges circuit breaker telemetry to a Zenoss incident endpoint",
    long_about = "Watches a circuit breaker telemetry stream and raises one \
                  Zenoss event per alert-worthy condition it observes.\n\n\
                  Conditions:\n\
                  - Circuit forced open (Critical)\n\
                  - Circuit short circuited (Critical)\n\
                  - Circuit reporting errors (Error)"
)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "NOTIFIER_CONFIG_FILE",
        value_name = "FILE",
        help = "Path to YAML configuration file"
    )]
    config: Option<PathBuf>,

    /// Telemetry stream URL
    #[arg(long, env = "NOTIFIER_STREAM_URL", help = "Telemetry stream URL")]
    stream_url: Option<String>,

    /// Zenoss event router URL
    #[arg(long, env = "NOTIFIER_ZENOSS_URL", help = "Zenoss event router URL")]
    zenoss_url: Option<String>,

    /// Verbose output
    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = load_config(&cli)?;

    // Override with CLI arguments
    if let Some(url) = cli.stream_url {
        config.stream.url = url;
    }
    if let Some(url) = cli.zenoss_url {
        config.zenoss.endpoint = url;
    }
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }

    init_tracing(&config.observability);

    config.validate()?;
    let component = config.primary_component()?.to_string();

    let zenoss = ZenossClient::new(ZenossConfig {
        endpoint: config.zenoss.endpoint.clone(),
        username: config.zenoss.username.clone(),
        password: config.zenoss.password.clone(),
        timeout_secs: config.zenoss.timeout_secs,
    })?;

    let evaluator = Evaluator::new(
        EvaluatorConfig::new(config.blacklist.clone(), component),
        Arc::new(zenoss),
    );

    let client = StreamClient::new(StreamConfig {
        url: config.stream.url.clone(),
        reconnect_delay: Duration::from_secs(config.stream.reconnect_delay_secs),
        connect_timeout: Duration::from_secs(config.stream.connect_timeout_secs),
    })?;

    info!(
        "Watching circuit breaker telemetry at {}",
        config.stream.url
    );

    // Runs for the process lifetime; there is no shutdown path.
    client.run(Arc::new(evaluator)).await;

    Ok(())
}

/// Load configuration from file, environment, or defaults
fn load_config(cli: &Cli) -> anyhow::Result<NotifierConfig> {
    match &cli.config {
        Some(path) => Ok(NotifierConfig::load(Some(path.clone()))?),
        None => Ok(NotifierConfig::load(None).unwrap_or_default()),
    }
}

/// Initialize tracing/logging
fn init_tracing(observability: &ObservabilityConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&observability.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if observability.json_logging {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}
