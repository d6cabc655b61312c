//! Docvy Utilities
//!
//! Small helpers shared by Docvy components: configuration stores with
//! recursive default filling, application path resolution, callback guards
//! and user-defined error kinds with parent chaining.

pub mod callback;
pub mod config;
pub mod defined_error;
pub mod error;
pub mod logging;
pub mod paths;

pub use crate::callback::{define_callback, Callback, Candidate};
pub use crate::config::{fill_object, ConfigLoader, ConfigSource, ConfigStore, MergePolicy};
pub use crate::defined_error::{define_error, DefinedError, ErrorKind, SharedError};
pub use crate::error::UtilsError;
pub use crate::paths::{get_path, AppPath, PathResolver};
