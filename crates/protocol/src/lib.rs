//! Pulse - Protocol
//!
//! Wire payload encoding for the telemetry pipeline.
//!
//! # Overview
//!
//! This crate provides:
//! - `MetricPoint`: the unit of data handed to the exporter
//! - `MetricBuilder`: an owned accumulator that renders a batch of points
//!   as OTLP-style JSON or newline-delimited line protocol
//! - Log stream payload types for shipped log records
//!
//! # Design
//!
//! The builder is passed by ownership: appending consumes and returns it, so
//! the render step has no hidden shared state, and two builders fed the same
//! call sequence produce byte-identical output.

mod builder;
mod line;
mod logs;
mod otlp;
mod point;

pub use builder::MetricBuilder;
pub use logs::{LogStream, LogStreamPayload, StreamLabels};
pub use otlp::{
    DataPoint, Metric, OtlpGauge, OtlpPayload, OtlpSum, ResourceMetrics, ScopeMetrics,
    AGGREGATION_TEMPORALITY_CUMULATIVE,
};
pub use point::{MetricKind, MetricPoint, MetricValue};

use chrono::Utc;

/// Nanoseconds since the Unix epoch.
///
/// Wire timestamps are stamped once per batch; successive batches carry
/// monotonically increasing timestamps in any practical deployment.
pub fn now_nanos() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(0) as u64
}
