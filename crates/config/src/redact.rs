//! Log redaction configuration
//!
//! Names the fields that must never leave the process in a shipped log
//! record. Matching is case-insensitive and applies at any nesting depth.

use serde::Deserialize;

/// Redaction configuration
///
/// # Example
///
/// ```toml
/// [redact]
/// fields = ["password", "token", "apiKey"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedactConfig {
    /// Field names whose values are replaced before export
    /// Default: ["password", "token"]
    pub fields: Vec<String>,
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            fields: vec!["password".to_string(), "token".to_string()],
        }
    }
}
