//! Pulse Configuration
//!
//! TOML-based configuration loading with sensible defaults. Backend
//! coordinates (URL + credential) are the only required values; everything
//! else has a default that just works.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use pulse_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     "[metrics]\nurl = \"https://otlp.example.net\"\napi_key = \"k\"\n\
//!      [logs]\nurl = \"https://logs.example.net\"\napi_key = \"k\"",
//! )
//! .unwrap();
//! assert_eq!(config.metrics.source, "pulse");
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [metrics]
//! url = "https://otlp.example.net/v1/metrics"
//! api_key = "secret"
//! source = "storefront"
//! interval = "10s"
//! timeout = "5s"
//! format = "otlp"
//!
//! [logs]
//! url = "https://logs.example.net/push"
//! api_key = "secret"
//! source = "storefront"
//!
//! [sessions]
//! idle_threshold = "10m"
//!
//! [redact]
//! fields = ["password", "token"]
//! ```

mod error;
mod export;
mod redact;
mod sessions;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use export::{LogExportConfig, MetricsExportConfig, WireFormat};
pub use redact::RedactConfig;
pub use sessions::SessionConfig;

/// Top-level pipeline configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metrics backend and flush cadence
    pub metrics: MetricsExportConfig,

    /// Log backend
    pub logs: LogExportConfig,

    /// Active-session tracking
    pub sessions: SessionConfig,

    /// Sensitive-field redaction
    pub redact: RedactConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    ///
    /// This is the only fatal error class in the pipeline: a missing backend
    /// URL or credential fails startup instead of the first flush.
    pub fn validate(&self) -> Result<()> {
        self.metrics.validate()?;
        self.logs.validate()?;
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const MINIMAL: &str = r#"
[metrics]
url = "https://otlp.example.net/v1/metrics"
api_key = "mk"

[logs]
url = "https://logs.example.net/push"
api_key = "lk"
"#;

    #[test]
    fn test_minimal_config_validates() {
        let config = Config::from_str(MINIMAL).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.metrics.interval, Duration::from_secs(10));
        assert_eq!(config.sessions.idle_threshold, Duration::from_secs(600));
        assert_eq!(config.redact.fields, vec!["password", "token"]);
    }

    #[test]
    fn test_empty_config_fails_validation() {
        let config = Config::from_str("").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("[metrics\nurl = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[metrics]
url = "https://otlp.example.net/v1/metrics"
api_key = "mk"
source = "storefront"
interval = "1s"
format = "line"

[logs]
url = "https://logs.example.net/push"
api_key = "lk"
source = "storefront"

[sessions]
idle_threshold = "2m"

[redact]
fields = ["password", "token", "apiKey"]
"#;
        let config = Config::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.metrics.format, WireFormat::Line);
        assert_eq!(config.metrics.interval, Duration::from_secs(1));
        assert_eq!(config.sessions.idle_threshold, Duration::from_secs(120));
        assert_eq!(config.redact.fields.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/pulse.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
