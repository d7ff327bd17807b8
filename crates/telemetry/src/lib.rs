//! Pulse telemetry - flush scheduling, export, and log shipping.
//!
//! Key principles:
//!
//! - **Non-blocking**: request handlers only bump atomic counters; all
//!   delivery is fire-and-forget off the request path
//! - **Lossy by design**: at-most-once, best-effort delivery; a failed push
//!   is logged and discarded, never retried. Exported counters are
//!   cumulative totals, so a dropped flush delays visibility without losing
//!   a delta
//! - **Invisible on failure**: no telemetry error propagates back to, or
//!   alters the outcome of, the request that produced the event
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────┐
//! │ middleware │────▶│  Aggregator │◀────│  Scheduler   │────▶│ Exporter │
//! │ (handlers) │     │ (snapshots) │     │ (tick/flush) │     │  (POST)  │
//! └────────────┘     └─────────────┘     └──────────────┘     └──────────┘
//!       │                                                          ▲
//!       │  on_log_event                                            │
//!       ▼                                                          │
//! ┌────────────┐     ┌─────────────┐                               │
//! │ LogShipper │────▶│  Sanitizer  │───────────────────────────────┘
//! │ (per event)│     │  (redact)   │
//! └────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pulse_config::Config;
//! use pulse_metrics::Method;
//! use pulse_telemetry::Telemetry;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn wiring(config: Config) -> pulse_config::Result<()> {
//! let cancel = CancellationToken::new();
//! let telemetry = Telemetry::start(&config, cancel.clone())?;
//!
//! // From request middleware:
//! telemetry.on_request_start(Method::Get);
//! telemetry.on_request_complete(200, 12);
//!
//! // On shutdown, stop the recurring timer:
//! cancel.cancel();
//! # Ok(())
//! # }
//! ```

mod error;
mod exporter;
mod handle;
mod redact;
mod scheduler;
mod shipper;

pub use error::TelemetryError;
pub use exporter::{Endpoint, Exporter, HttpTransport, Transport};
pub use handle::{Telemetry, TelemetryHandle};
pub use redact::{Sanitizer, REDACTION_MARKER};
pub use scheduler::Scheduler;
pub use shipper::{LogLevel, LogShipper};
