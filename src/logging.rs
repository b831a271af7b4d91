//! Logging System
//!
//! Structured logging via the `tracing` crate. Level and format come from
//! configuration with environment-variable overrides (`MERKLEDAG_LOG`,
//! `MERKLEDAG_LOG_FORMAT`).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Invalid logging configuration.
#[derive(Debug, Error)]
#[error("invalid logging configuration: {0}")]
pub struct LoggingConfigError(String);

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// Precedence, highest first: `MERKLEDAG_LOG` / `MERKLEDAG_LOG_FORMAT`
/// environment variables, then the provided config, then defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), LoggingConfigError> {
    let filter = build_env_filter(config);
    let format = determine_format(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);

    if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

fn build_env_filter(config: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("MERKLEDAG_LOG") {
        return filter;
    }
    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    EnvFilter::new(level)
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<String, LoggingConfigError> {
    let format = match std::env::var("MERKLEDAG_LOG_FORMAT") {
        Ok(format) => format,
        Err(_) => config
            .map(|c| c.format.clone())
            .unwrap_or_else(default_format),
    };

    if format != "json" && format != "text" {
        return Err(LoggingConfigError(format!(
            "log format must be 'json' or 'text', got '{}'",
            format
        )));
    }
    Ok(format)
}
