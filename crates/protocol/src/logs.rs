//! Log stream payload
//!
//! Shipped log records travel as
//! `{streams: [{stream: {component, level, type}, values: [[ts, line]]}]}`
//! where `ts` is a nanosecond timestamp rendered as a string.

use serde::Serialize;

/// Top-level log push payload
#[derive(Debug, Clone, Serialize)]
pub struct LogStreamPayload {
    pub streams: Vec<LogStream>,
}

/// One labeled stream with its entries
#[derive(Debug, Clone, Serialize)]
pub struct LogStream {
    pub stream: StreamLabels,
    /// `[timestamp_nanos_as_string, record_line]` pairs
    pub values: Vec<(String, String)>,
}

/// Labels attached to every record in a stream
#[derive(Debug, Clone, Serialize)]
pub struct StreamLabels {
    /// Originating component (the configured source label)
    pub component: String,
    /// Severity ("info", "warn", "error")
    pub level: String,
    /// Record category (e.g., "http", "db", "order")
    #[serde(rename = "type")]
    pub kind: String,
}

impl LogStreamPayload {
    /// Build a payload carrying a single record.
    ///
    /// Records ship per-event, unbatched, so this is the only constructor
    /// the shipper needs.
    pub fn single(labels: StreamLabels, time_unix_nano: u64, line: String) -> Self {
        Self {
            streams: vec![LogStream {
                stream: labels,
                values: vec![(time_unix_nano.to_string(), line)],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record_shape() {
        let payload = LogStreamPayload::single(
            StreamLabels {
                component: "storefront".to_string(),
                level: "warn".to_string(),
                kind: "http".to_string(),
            },
            1_700_000_000_000_000_000,
            "{\"statusCode\":404}".to_string(),
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["streams"][0]["stream"]["component"], "storefront");
        assert_eq!(json["streams"][0]["stream"]["level"], "warn");
        assert_eq!(json["streams"][0]["stream"]["type"], "http");
        assert_eq!(
            json["streams"][0]["values"][0][0],
            "1700000000000000000"
        );
        assert_eq!(json["streams"][0]["values"][0][1], "{\"statusCode\":404}");
    }
}
