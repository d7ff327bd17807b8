//! Structured log shipping
//!
//! Every record is sanitized, tagged with `{component, level, type}` labels
//! and a nanosecond timestamp, then pushed to the log backend with the same
//! delivery semantics as metrics: fire-and-forget, per-event, no retry.

use serde::Serialize;
use tracing::warn;

use pulse_protocol::{now_nanos, LogStreamPayload, StreamLabels};

use crate::exporter::Exporter;
use crate::redact::Sanitizer;

/// Severity attached to a shipped record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Label used in the stream payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Severity for a completed HTTP request
    pub fn from_status(status_code: u16) -> Self {
        if status_code >= 500 {
            Self::Error
        } else if status_code >= 400 {
            Self::Warn
        } else {
            Self::Info
        }
    }
}

/// Ships sanitized structured records to the log backend.
#[derive(Clone)]
pub struct LogShipper {
    exporter: Exporter,
    sanitizer: Sanitizer,
    component: String,
}

impl LogShipper {
    /// Create a shipper for the given component label
    pub fn new(exporter: Exporter, sanitizer: Sanitizer, component: &str) -> Self {
        Self {
            exporter,
            sanitizer,
            component: component.to_string(),
        }
    }

    /// Sanitize and ship one record. Never blocks and never fails the
    /// caller; encoding problems are logged and the record is dropped.
    pub fn log<T: Serialize>(&self, level: LogLevel, kind: &str, data: &T) {
        let line = self.sanitizer.sanitize(data);
        let payload = LogStreamPayload::single(
            StreamLabels {
                component: self.component.clone(),
                level: level.as_str().to_string(),
                kind: kind.to_string(),
            },
            now_nanos(),
            line,
        );

        match serde_json::to_string(&payload) {
            Ok(body) => self.exporter.send(body),
            Err(err) => warn!(error = %err, "failed to encode log payload, record dropped"),
        }
    }
}
