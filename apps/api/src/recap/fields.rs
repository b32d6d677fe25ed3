//! Get-or-default accessors over raw upstream JSON.
//!
//! Box scores arrive as loosely structured JSON. Every read in the recap
//! pipeline goes through these helpers so a missing key, a `null`, or a value
//! of the wrong type degrades to a zero-equivalent instead of an error.

use serde_json::Value;

/// Explicit default-value reads on a JSON object.
pub trait Fields {
    /// Nested object under `key`, or `None` when absent or not an object.
    fn section(&self, key: &str) -> Option<&Value>;

    /// String under `key`, or `""`.
    fn str_or_empty(&self, key: &str) -> &str;

    /// Integer under `key`, or `0`.
    ///
    /// Floats are truncated toward zero and saturate at the `i64` bounds, so a
    /// fractional count such as `leadChanges: 0.5` reads as `0` and `31.9` as
    /// `31`. The live feed only sends integers for these fields.
    fn int_or_zero(&self, key: &str) -> i64;

    /// Number under `key` as `f64`, or `0.0`.
    fn float_or_zero(&self, key: &str) -> f64;
}

impl Fields for Value {
    fn section(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| v.is_object())
    }

    fn str_or_empty(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    fn int_or_zero(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(v) => v
                .as_i64()
                .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0),
            None => 0,
        }
    }

    fn float_or_zero(&self, key: &str) -> f64 {
        self.get(key)
            .and_then(Value::as_f64)
            .filter(|f| f.is_finite())
            .unwrap_or(0.0)
    }
}
