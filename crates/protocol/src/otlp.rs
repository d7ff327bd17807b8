//! OTLP-style JSON metrics payload
//!
//! The backend expects `resourceMetrics[].scopeMetrics[].metrics[]`, each
//! metric carrying `name`, `unit`, and a `sum` or `gauge` object with data
//! points. Sum metrics additionally carry cumulative-monotonic aggregation
//! semantics, since exported counters are running totals rather than deltas.

use serde::Serialize;

use crate::point::{MetricKind, MetricPoint, MetricValue};

/// Aggregation temporality marker for sum metrics
pub const AGGREGATION_TEMPORALITY_CUMULATIVE: &str = "AGGREGATION_TEMPORALITY_CUMULATIVE";

/// Top-level OTLP metrics payload
#[derive(Debug, Clone, Serialize)]
pub struct OtlpPayload {
    #[serde(rename = "resourceMetrics")]
    pub resource_metrics: Vec<ResourceMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceMetrics {
    #[serde(rename = "scopeMetrics")]
    pub scope_metrics: Vec<ScopeMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScopeMetrics {
    pub metrics: Vec<Metric>,
}

/// One named metric with either sum or gauge semantics
#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub name: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<OtlpSum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge: Option<OtlpGauge>,
}

/// Cumulative monotonic counter
#[derive(Debug, Clone, Serialize)]
pub struct OtlpSum {
    #[serde(rename = "dataPoints")]
    pub data_points: Vec<DataPoint>,
    #[serde(rename = "aggregationTemporality")]
    pub aggregation_temporality: &'static str,
    #[serde(rename = "isMonotonic")]
    pub is_monotonic: bool,
}

/// Instantaneous sampled value
#[derive(Debug, Clone, Serialize)]
pub struct OtlpGauge {
    #[serde(rename = "dataPoints")]
    pub data_points: Vec<DataPoint>,
}

/// A single measurement with its wire timestamp
#[derive(Debug, Clone, Serialize)]
pub struct DataPoint {
    #[serde(rename = "asInt", skip_serializing_if = "Option::is_none")]
    pub as_int: Option<i64>,
    #[serde(rename = "asDouble", skip_serializing_if = "Option::is_none")]
    pub as_double: Option<f64>,
    #[serde(rename = "timeUnixNano")]
    pub time_unix_nano: u64,
}

impl DataPoint {
    fn from_value(value: MetricValue, time_unix_nano: u64) -> Self {
        match value {
            MetricValue::Int(v) => Self {
                as_int: Some(v),
                as_double: None,
                time_unix_nano,
            },
            MetricValue::Double(v) => Self {
                as_int: None,
                as_double: Some(v),
                time_unix_nano,
            },
        }
    }
}

impl OtlpPayload {
    /// Build the payload from a batch of points, preserving append order.
    ///
    /// An empty batch produces an empty but well-formed payload: one
    /// resource entry, one scope entry, zero metrics.
    pub fn from_points(points: &[MetricPoint]) -> Self {
        let metrics = points
            .iter()
            .map(|point| {
                let data_point = DataPoint::from_value(point.value, point.time_unix_nano);
                let (sum, gauge) = match point.kind {
                    MetricKind::Sum => (
                        Some(OtlpSum {
                            data_points: vec![data_point],
                            aggregation_temporality: AGGREGATION_TEMPORALITY_CUMULATIVE,
                            is_monotonic: true,
                        }),
                        None,
                    ),
                    MetricKind::Gauge => (
                        None,
                        Some(OtlpGauge {
                            data_points: vec![data_point],
                        }),
                    ),
                };

                Metric {
                    name: point.name.clone(),
                    unit: point.unit.clone(),
                    sum,
                    gauge,
                }
            })
            .collect();

        Self {
            resource_metrics: vec![ResourceMetrics {
                scope_metrics: vec![ScopeMetrics { metrics }],
            }],
        }
    }
}
