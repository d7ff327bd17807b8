//! Metric batch builder
//!
//! An owned accumulator: each append consumes the builder and returns it,
//! so no two call sites can alias the same batch. Appending is pure and
//! order-preserving; two builders given the same call sequence produce
//! byte-identical rendered output.

use serde_json::Error as JsonError;

use crate::line;
use crate::otlp::OtlpPayload;
use crate::point::{MetricKind, MetricPoint, MetricValue};

/// Default line-protocol prefix
const DEFAULT_PREFIX: &str = "metrics";

/// Accumulates metric points for one flush and renders the wire payload.
#[derive(Debug, Clone)]
pub struct MetricBuilder {
    source: String,
    prefix: String,
    time_unix_nano: u64,
    points: Vec<MetricPoint>,
}

impl MetricBuilder {
    /// Create a builder stamping points with the current time
    pub fn new(source: &str) -> Self {
        Self::at(source, crate::now_nanos())
    }

    /// Create a builder with a fixed batch timestamp.
    ///
    /// The scheduler stamps each flush once, so every point in a batch
    /// carries the same timestamp and rendered output is deterministic for
    /// a given timestamp.
    pub fn at(source: &str, time_unix_nano: u64) -> Self {
        Self {
            source: source.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            time_unix_nano,
            points: Vec::new(),
        }
    }

    /// Override the line-protocol prefix
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Append a cumulative counter point
    pub fn sum(self, name: &str, value: impl Into<MetricValue>, unit: &str) -> Self {
        self.append(MetricKind::Sum, name, value.into(), unit)
    }

    /// Append an instantaneous gauge point
    pub fn gauge(self, name: &str, value: impl Into<MetricValue>, unit: &str) -> Self {
        self.append(MetricKind::Gauge, name, value.into(), unit)
    }

    fn append(mut self, kind: MetricKind, name: &str, value: MetricValue, unit: &str) -> Self {
        self.points.push(MetricPoint {
            name: name.to_string(),
            value,
            kind,
            unit: unit.to_string(),
            time_unix_nano: self.time_unix_nano,
        });
        self
    }

    /// Number of accumulated points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points have been appended
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The accumulated points, in append order
    pub fn points(&self) -> &[MetricPoint] {
        &self.points
    }

    /// Render the OTLP-style JSON payload.
    ///
    /// A builder with zero points renders an empty but well-formed payload;
    /// a flush with no activity still goes out.
    pub fn render_json(&self) -> Result<String, JsonError> {
        serde_json::to_string(&OtlpPayload::from_points(&self.points))
    }

    /// Render delimiter-joined line protocol
    pub fn render_line(&self, delimiter: &str) -> String {
        line::render(&self.points, &self.prefix, &self.source, delimiter)
    }
}
