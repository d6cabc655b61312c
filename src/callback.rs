//! Callback guard.
//!
//! Callers that accept an optional completion handler normalise it through
//! [`define_callback`] so they can always invoke the result unconditionally.

use serde_json::Value;
use std::sync::Arc;

/// Shared callable taking a single argument.
pub type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Something passed where a callback was expected.
pub enum Candidate<T> {
    Function(Callback<T>),
    /// Any non-callable value (numbers, strings, arrays, objects, null).
    Value(Value),
}

impl<T> From<Callback<T>> for Candidate<T> {
    fn from(callback: Callback<T>) -> Self {
        Candidate::Function(callback)
    }
}

impl<T> From<Option<Callback<T>>> for Candidate<T> {
    fn from(callback: Option<Callback<T>>) -> Self {
        match callback {
            Some(callback) => Candidate::Function(callback),
            None => Candidate::Value(Value::Null),
        }
    }
}

impl<T> From<Value> for Candidate<T> {
    fn from(value: Value) -> Self {
        Candidate::Value(value)
    }
}

/// Return `candidate` if it is callable, otherwise a callable that does nothing.
pub fn define_callback<T: 'static>(candidate: impl Into<Candidate<T>>) -> Callback<T> {
    match candidate.into() {
        Candidate::Function(callback) => callback,
        Candidate::Value(_) => noop(),
    }
}

fn noop<T: 'static>() -> Callback<T> {
    Arc::new(|_: T| {})
}
