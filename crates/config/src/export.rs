//! Export backend configuration
//!
//! Controls where and how often metrics and logs are pushed.
//!
//! # Defaults
//!
//! - `interval`: 10s flush period for metrics
//! - `timeout`: 5s bound on any single outbound push
//! - `format`: otlp
//! - `source`: "pulse"
//!
//! The backend `url` and `api_key` have no defaults: both are required and
//! validated at startup rather than on the first flush.

use serde::Deserialize;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Wire format for the metrics payload
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// OTLP-style JSON (`resourceMetrics[].scopeMetrics[].metrics[]`)
    #[default]
    Otlp,
    /// Newline-delimited line protocol (`prefix,source=<src> name=value`)
    Line,
}

impl WireFormat {
    /// Content type sent with the payload
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Otlp => "application/json",
            Self::Line => "text/plain",
        }
    }
}

/// Metrics export configuration
///
/// # Example
///
/// ```toml
/// [metrics]
/// url = "https://otlp.example.net/v1/metrics"
/// api_key = "secret"
/// source = "storefront"
/// interval = "10s"
/// timeout = "5s"
/// format = "otlp"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsExportConfig {
    /// Backend URL to POST metric payloads to (required)
    pub url: String,

    /// Bearer credential for the backend (required)
    pub api_key: String,

    /// Source label attached to exported metrics
    /// Default: "pulse"
    pub source: String,

    /// Flush period
    /// Default: 10s
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Bound on a single outbound push
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Payload wire format (otlp, line)
    /// Default: otlp
    pub format: WireFormat,
}

impl Default for MetricsExportConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            source: "pulse".to_string(),
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(5),
            format: WireFormat::Otlp,
        }
    }
}

impl MetricsExportConfig {
    /// Validate required fields. Missing backend coordinates are fatal.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(ConfigError::missing_field("metrics", "url"));
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::missing_field("metrics", "api_key"));
        }
        if self.interval.is_zero() {
            return Err(ConfigError::invalid_value(
                "metrics",
                "interval",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Log export configuration
///
/// The log backend is a separate endpoint from the metrics backend with the
/// same delivery semantics: fire-and-forget, no retry.
///
/// # Example
///
/// ```toml
/// [logs]
/// url = "https://logs.example.net/push"
/// api_key = "secret"
/// source = "storefront"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogExportConfig {
    /// Backend URL to POST log streams to (required)
    pub url: String,

    /// Bearer credential for the log backend (required)
    pub api_key: String,

    /// Component label attached to every shipped record
    /// Default: "pulse"
    pub source: String,

    /// Bound on a single outbound push
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for LogExportConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            source: "pulse".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl LogExportConfig {
    /// Validate required fields
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(ConfigError::missing_field("logs", "url"));
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::missing_field("logs", "api_key"));
        }
        Ok(())
    }
}
