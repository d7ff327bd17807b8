//! Line-protocol rendering
//!
//! Alternative text wire form: one measurement per line, shaped as
//! `prefix,source=<src> name=value`.

use crate::point::MetricPoint;

/// Render points as delimiter-joined line protocol.
///
/// An empty batch renders an empty string, which the backend accepts as a
/// payload with no measurements.
pub fn render(points: &[MetricPoint], prefix: &str, source: &str, delimiter: &str) -> String {
    points
        .iter()
        .map(|point| format!("{},source={} {}={}", prefix, source, point.name, point.value))
        .collect::<Vec<_>>()
        .join(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{MetricKind, MetricValue};

    fn point(name: &str, value: MetricValue) -> MetricPoint {
        MetricPoint {
            name: name.to_string(),
            value,
            kind: MetricKind::Sum,
            unit: "1".to_string(),
            time_unix_nano: 0,
        }
    }

    #[test]
    fn test_line_shape() {
        let rendered = render(
            &[point("http_requests_total", MetricValue::Int(100))],
            "metrics",
            "storefront",
            "\n",
        );
        assert_eq!(rendered, "metrics,source=storefront http_requests_total=100");
    }

    #[test]
    fn test_multiple_lines_newline_delimited() {
        let rendered = render(
            &[
                point("auth_success", MetricValue::Int(3)),
                point("revenue", MetricValue::Double(36.5)),
            ],
            "metrics",
            "storefront",
            "\n",
        );
        assert_eq!(
            rendered,
            "metrics,source=storefront auth_success=3\nmetrics,source=storefront revenue=36.5"
        );
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(render(&[], "metrics", "storefront", "\n"), "");
    }
}
