//! Recursive default filling.

mod merge_policy;

pub use merge_policy::{is_falsy, MergePolicy};

use serde_json::Value;

/// Fill the keys `object` lacks from `defaults`, using [`MergePolicy::Falsy`].
///
/// Returns a new tree; neither argument is modified. When `object` is not a
/// mapping the result is a copy of `defaults`.
pub fn fill_object(object: &Value, defaults: &Value) -> Value {
    fill_object_with(object, defaults, MergePolicy::default())
}

/// [`fill_object`] with an explicit policy for what counts as missing.
///
/// For each key of `defaults`: a missing object value is replaced by the
/// default; a present value whose default is a mapping is filled
/// recursively (a non-mapping object value is then replaced by that default
/// mapping); any other present value is kept. Keys only `object` has are kept.
pub fn fill_object_with(object: &Value, defaults: &Value, policy: MergePolicy) -> Value {
    let Value::Object(object) = object else {
        return defaults.clone();
    };
    let mut filled = object.clone();
    let Value::Object(defaults) = defaults else {
        return Value::Object(filled);
    };

    for (key, default_value) in defaults {
        if policy.is_missing(filled.get(key)) {
            filled.insert(key.clone(), default_value.clone());
        } else if default_value.is_object() {
            let nested = fill_object_with(&filled[key], default_value, policy);
            filled.insert(key.clone(), nested);
        }
    }

    Value::Object(filled)
}
