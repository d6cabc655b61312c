//! Merge rules: which object-side values count as missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decides when a key supplied by the caller is overwritten by its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Absent keys and falsy values (`null`, `false`, `0`, `""`) take the default.
    #[default]
    Falsy,
    /// Only absent keys take the default.
    Presence,
}

impl MergePolicy {
    pub fn is_missing(self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) => true,
            (MergePolicy::Falsy, Some(value)) => is_falsy(value),
            (MergePolicy::Presence, Some(_)) => false,
        }
    }
}

/// Empty arrays and objects are not falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
