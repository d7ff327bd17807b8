//! Sensitive-field redaction
//!
//! Structural redaction over the parsed record, not pattern substitution on
//! serialized text: every map key matching the denylist (case-insensitive)
//! has its value replaced with a fixed marker, at any nesting depth, before
//! the record is serialized for shipping.

use serde::Serialize;
use serde_json::{json, Value};

/// Fixed replacement for redacted values
pub const REDACTION_MARKER: &str = "*****";

/// Redacts denylisted fields from structured log records.
///
/// Redaction is idempotent and total: applying it twice yields the same
/// output as once, and every matching key is replaced wherever it appears.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    /// Lowercased denylist
    deny: Vec<String>,
}

impl Sanitizer {
    /// Create a sanitizer for the given field names (matched
    /// case-insensitively)
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            deny: fields
                .into_iter()
                .map(|field| field.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Serialize a record with all denylisted fields redacted.
    ///
    /// Never panics: a record that cannot be converted to JSON is replaced
    /// by a stringified error record instead.
    pub fn sanitize<T: Serialize>(&self, data: &T) -> String {
        match serde_json::to_value(data) {
            Ok(mut value) => {
                self.sanitize_value(&mut value);
                value.to_string()
            }
            Err(err) => json!({ "unserializable": err.to_string() }).to_string(),
        }
    }

    /// Redact denylisted fields in place, recursing through objects and
    /// arrays
    pub fn sanitize_value(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, entry) in map.iter_mut() {
                    if self.is_denied(key) {
                        *entry = Value::String(REDACTION_MARKER.to_string());
                    } else {
                        self.sanitize_value(entry);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.sanitize_value(item);
                }
            }
            _ => {}
        }
    }

    fn is_denied(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.deny.iter().any(|denied| *denied == key)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(["password", "token"])
    }
}
