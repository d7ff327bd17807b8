//! Active-session tracking configuration

use serde::Deserialize;
use std::time::Duration;

/// Session tracking configuration
///
/// # Example
///
/// ```toml
/// [sessions]
/// idle_threshold = "10m"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Inactivity duration after which a session is expired and no longer
    /// counted as active
    /// Default: 10 minutes
    #[serde(with = "humantime_serde")]
    pub idle_threshold: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_threshold: Duration::from_secs(600),
        }
    }
}
