//! Error factory.
//!
//! [`define_error`] produces an [`ErrorKind`]: a code plus a default message.
//! Every instance built from a kind is a [`DefinedError`], which implements
//! `std::error::Error` so generic handlers (`?`, `Box<dyn Error>`, `source()`
//! chains) treat it like any other error, while [`DefinedError::is_kind`]
//! still tells kinds apart.
//!
//! An instance may point at a parent error. The parent is shared, not owned:
//! it is held behind an `Arc`. When the parent is itself a `DefinedError` its
//! captured stack trace is adopted, so the trace points at the original
//! failure rather than the wrapping site.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared reference to any error usable as a parent.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

static NEXT_KIND_ID: AtomicU64 = AtomicU64::new(1);

/// A distinct error kind, identified by an upper-cased code.
#[derive(Debug, Clone)]
pub struct ErrorKind {
    id: u64,
    code: Arc<str>,
    default_message: Arc<str>,
}

/// Define a new error kind.
///
/// `code` is upper-cased and serves as both code and display name. Two calls
/// with the same code still yield two different kinds.
pub fn define_error(code: &str, default_message: &str) -> ErrorKind {
    ErrorKind {
        id: NEXT_KIND_ID.fetch_add(1, Ordering::Relaxed),
        code: Arc::from(code.to_uppercase()),
        default_message: Arc::from(default_message),
    }
}

impl ErrorKind {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Instance carrying the default message.
    pub fn error(&self) -> DefinedError {
        self.build(None, None)
    }

    /// Instance carrying a custom message.
    pub fn with_message(&self, message: impl Into<String>) -> DefinedError {
        self.build(Some(message.into()), None)
    }

    /// Instance with the default message wrapping `parent`.
    pub fn caused_by<E>(&self, parent: E) -> DefinedError
    where
        E: Error + Send + Sync + 'static,
    {
        self.build(None, Some(Arc::new(parent)))
    }

    /// Instance with an optional custom message and an optional shared parent.
    pub fn create(&self, message: Option<&str>, parent: Option<SharedError>) -> DefinedError {
        self.build(message.map(str::to_string), parent)
    }

    /// Whether `err` is an instance of this kind.
    pub fn matches(&self, err: &(dyn Error + 'static)) -> bool {
        err.downcast_ref::<DefinedError>()
            .map(|e| e.is_kind(self))
            .unwrap_or(false)
    }

    fn build(&self, message: Option<String>, parent: Option<SharedError>) -> DefinedError {
        let stack = match parent.as_ref() {
            Some(parent) => inherited_stack(&**parent),
            None => Some(Arc::new(Backtrace::force_capture())),
        };
        DefinedError {
            kind: self.clone(),
            message: message.unwrap_or_else(|| self.default_message.to_string()),
            parent,
            stack,
        }
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ErrorKind {}

/// Stack trace a child adopts from `parent`.
///
/// Defined errors hand over their own trace (even a removed one). Any other
/// error exposes no trace on stable Rust, so one is captured here instead.
fn inherited_stack(parent: &(dyn Error + Send + Sync + 'static)) -> Option<Arc<Backtrace>> {
    if let Some(defined) = parent.downcast_ref::<DefinedError>() {
        return defined.stack.clone();
    }
    if let Some(defined) = parent.downcast_ref::<Arc<DefinedError>>() {
        return defined.stack.clone();
    }
    Some(Arc::new(Backtrace::force_capture()))
}

/// An instance of an [`ErrorKind`].
#[derive(Clone)]
pub struct DefinedError {
    kind: ErrorKind,
    message: String,
    parent: Option<SharedError>,
    stack: Option<Arc<Backtrace>>,
}

impl DefinedError {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn code(&self) -> &str {
        &self.kind.code
    }

    /// Display name of the kind; always equal to the code.
    pub fn name(&self) -> &str {
        &self.kind.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&SharedError> {
        self.parent.as_ref()
    }

    pub fn stack(&self) -> Option<&Backtrace> {
        self.stack.as_deref()
    }

    pub fn is_kind(&self, kind: &ErrorKind) -> bool {
        self.kind == *kind
    }

    /// Link `parent` after construction and adopt its stack trace.
    pub fn set_parent<E>(&mut self, parent: E) -> &mut Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.set_shared_parent(Arc::new(parent))
    }

    pub fn set_shared_parent(&mut self, parent: SharedError) -> &mut Self {
        self.stack = inherited_stack(&*parent);
        self.parent = Some(parent);
        self
    }

    /// Builder form of [`DefinedError::set_parent`].
    pub fn with_parent<E>(mut self, parent: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.set_parent(parent);
        self
    }

    /// Drop the captured stack trace, e.g. before serializing for a client.
    pub fn without_stack(mut self) -> Self {
        self.stack = None;
        self
    }
}

impl fmt::Display for DefinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.message)
    }
}

impl fmt::Debug for DefinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinedError")
            .field("code", &self.code())
            .field("message", &self.message)
            .field("parent", &self.parent)
            .field("has_stack", &self.stack.is_some())
            .finish()
    }
}

impl Error for DefinedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.parent
            .as_deref()
            .map(|parent| parent as &(dyn Error + 'static))
    }
}

impl Serialize for DefinedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DefinedError", 5)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("stack", &self.stack.as_ref().map(|s| s.to_string()))?;
        state.serialize_field("parent", &self.parent.as_ref().map(|p| p.to_string()))?;
        state.end()
    }
}
