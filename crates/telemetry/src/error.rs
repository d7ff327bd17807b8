//! Telemetry error types

use thiserror::Error;

/// Errors that can occur while rendering or delivering telemetry.
///
/// None of these are fatal: every variant is logged and discarded at the
/// scheduler or shipper boundary, and nothing propagates back to the request
/// path that generated the underlying event.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Transport-level failure: the payload was never sent
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status: sent but rejected
    #[error("backend rejected payload: HTTP {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnosis
        body: String,
    },

    /// Payload rendering failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
