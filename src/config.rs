//! Configuration System
//!
//! A [`ConfigStore`] holds one configuration tree. Callers read merged views
//! with [`ConfigStore::get_options`], supplying per-call overrides that win
//! over the stored defaults. Stores are plain values: [`ConfigStore::configure`]
//! returns a new store instead of mutating shared state, so unrelated callers
//! never observe each other's configuration.

use crate::error::UtilsError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

mod facade;
mod merge;
mod offset;
mod sources;

pub use facade::ConfigLoader;
pub use merge::{fill_object, fill_object_with, is_falsy, MergePolicy};
pub use offset::resolve_offset;

/// Input accepted by [`ConfigStore::configure`].
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Name (or path) resolved through [`ConfigLoader::new`].
    Named(String),
    /// A fully set-up loader.
    Loader(ConfigLoader),
    /// A single file.
    File(PathBuf),
    /// A literal tree. Anything other than a mapping is ignored.
    Literal(Value),
}

impl From<&str> for ConfigSource {
    fn from(name: &str) -> Self {
        ConfigSource::Named(name.to_string())
    }
}

impl From<String> for ConfigSource {
    fn from(name: String) -> Self {
        ConfigSource::Named(name)
    }
}

impl From<ConfigLoader> for ConfigSource {
    fn from(loader: ConfigLoader) -> Self {
        ConfigSource::Loader(loader)
    }
}

impl From<Value> for ConfigSource {
    fn from(value: Value) -> Self {
        ConfigSource::Literal(value)
    }
}

/// In-memory configuration tree plus the policy used to merge overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    config: Value,
    policy: MergePolicy,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            config: Value::Object(Map::new()),
            policy: MergePolicy::default(),
        }
    }
}

impl ConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store over `value`; a non-mapping gives an empty store.
    pub fn from_value(value: Value) -> Self {
        Self::new().replaced(value)
    }

    /// Same tree, different merge policy.
    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn value(&self) -> &Value {
        &self.config
    }

    /// Build a new store from `source`. The new tree replaces the current
    /// one in full; `self` is left untouched.
    ///
    /// A literal that is not a mapping leaves the configuration unchanged:
    /// the returned store is a copy of this one.
    pub fn configure(&self, source: impl Into<ConfigSource>) -> Result<ConfigStore, UtilsError> {
        let value = match source.into() {
            ConfigSource::Named(name) => ConfigLoader::new(name).load()?,
            ConfigSource::Loader(loader) => loader.load()?,
            ConfigSource::File(path) => ConfigLoader::load_from_file(&path)?,
            ConfigSource::Literal(value) => value,
        };
        if !value.is_object() {
            debug!("Ignoring non-mapping configuration source");
            return Ok(self.clone());
        }
        Ok(self.clone().replaced(value))
    }

    /// Shorthand for `configure(ConfigSource::File(..))`.
    pub fn configure_from_file(&self, path: &Path) -> Result<ConfigStore, UtilsError> {
        self.configure(ConfigSource::File(path.to_path_buf()))
    }

    /// Read the configuration, optionally narrowed by a dotted `offset` and
    /// filled into `user_options`.
    ///
    /// - Without an offset the whole tree is the default.
    /// - A missing offset component makes the default absent.
    /// - Without user options (`None` or JSON `null`) the default is returned.
    /// - When user options and default are both mappings, the user options
    ///   are filled from the default.
    /// - Otherwise the user options are returned unchanged.
    pub fn get_options(&self, offset: Option<&str>, user_options: Option<&Value>) -> Option<Value> {
        let defaults = match offset.filter(|o| !o.is_empty()) {
            Some(offset) => resolve_offset(&self.config, offset).cloned(),
            None => Some(self.config.clone()),
        };
        match (user_options.filter(|v| !v.is_null()), defaults) {
            (None, defaults) => defaults,
            (Some(user), Some(defaults)) if user.is_object() && defaults.is_object() => {
                Some(fill_object_with(user, &defaults, self.policy))
            }
            (Some(user), _) => Some(user.clone()),
        }
    }

    /// Alias for [`ConfigStore::get_options`].
    pub fn get_config(&self, offset: Option<&str>, user_options: Option<&Value>) -> Option<Value> {
        self.get_options(offset, user_options)
    }

    /// Typed view of [`ConfigStore::get_options`].
    pub fn get_as<T: DeserializeOwned>(
        &self,
        offset: Option<&str>,
        user_options: Option<&Value>,
    ) -> Result<Option<T>, UtilsError> {
        self.get_options(offset, user_options)
            .map(serde_json::from_value)
            .transpose()
            .map_err(UtilsError::from)
    }

    fn replaced(mut self, value: Value) -> Self {
        if value.is_object() {
            self.config = value;
        }
        self
    }
}
