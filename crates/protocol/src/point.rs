//! Metric point types

/// Numeric value of a metric point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Integer value, rendered as `asInt`
    Int(i64),
    /// Floating-point value, rendered as `asDouble`
    Double(f64),
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Double(value) => write!(f, "{}", value),
        }
    }
}

/// Aggregation kind of a metric point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Cumulative running total since process start, never a delta
    Sum,
    /// Instantaneous sampled value
    Gauge,
}

/// One named measurement handed to the exporter.
///
/// Created, serialized, and discarded within a single export attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    /// Metric name (e.g., "http_requests_get")
    pub name: String,
    /// Measured value
    pub value: MetricValue,
    /// Sum or gauge semantics
    pub kind: MetricKind,
    /// Unit label (e.g., "1", "ms", "%")
    pub unit: String,
    /// Nanoseconds since the Unix epoch
    pub time_unix_nano: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(MetricValue::from(42u64), MetricValue::Int(42));
        assert_eq!(MetricValue::from(-7i64), MetricValue::Int(-7));
        assert_eq!(MetricValue::from(1.5), MetricValue::Double(1.5));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(MetricValue::Int(36).to_string(), "36");
        assert_eq!(MetricValue::Double(36.5).to_string(), "36.5");
    }
}
