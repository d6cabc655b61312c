//! Named configuration loading.

use super::sources::{environment, global_file, rc_file};
use crate::error::UtilsError;
use config::{Config, File};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves a configuration name into a single configuration tree.
///
/// Sources, lowest precedence first:
/// 1. `<config_home>/<name>/config.{toml,json,yaml,...}`
/// 2. `<home>/.<name>rc`
/// 3. `<working_dir>/.<name>rc`
/// 4. `<NAME>__*` environment variables
///
/// A name that points at an existing file loads that file alone.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    name: String,
    home: Option<PathBuf>,
    config_home: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    environment: bool,
}

impl ConfigLoader {
    /// Loader for `name` using the process's home and working directories.
    pub fn new(name: impl Into<String>) -> Self {
        let home = crate::paths::home_dir();
        Self {
            name: name.into(),
            config_home: global_file::config_home(home.as_deref()),
            home,
            working_dir: std::env::current_dir().ok(),
            environment: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the home directory; the global config home follows it.
    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        self.config_home = Some(home.join(".config"));
        self.home = Some(home);
        self
    }

    pub fn config_home(mut self, config_home: impl Into<PathBuf>) -> Self {
        self.config_home = Some(config_home.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Skip the environment source.
    pub fn without_environment(mut self) -> Self {
        self.environment = false;
        self
    }

    /// Load and merge every source. Missing sources are skipped; an empty
    /// result is an empty mapping.
    pub fn load(&self) -> Result<Value, UtilsError> {
        let explicit = Path::new(&self.name);
        if explicit.is_file() {
            debug!(config_path = %explicit.display(), "Loading explicit configuration file");
            return Self::load_from_file(explicit);
        }

        let mut builder = Config::builder();
        builder = global_file::add_to_builder(builder, &self.name, self.config_home.as_deref())?;
        builder = rc_file::add_to_builder(builder, &self.name, self.home.as_deref())?;
        if self.working_dir != self.home {
            builder = rc_file::add_to_builder(builder, &self.name, self.working_dir.as_deref())?;
        }
        if self.environment {
            builder = environment::add_to_builder(builder, &self.name)?;
        }

        let value: Value = builder.build()?.try_deserialize()?;
        Self::ensure_mapping(&self.name, value)
    }

    /// Load a single file; the format follows its extension.
    pub fn load_from_file(path: &Path) -> Result<Value, UtilsError> {
        let value: Value = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        Self::ensure_mapping(&path.display().to_string(), value)
    }

    fn ensure_mapping(name: &str, value: Value) -> Result<Value, UtilsError> {
        match value {
            Value::Object(_) => Ok(value),
            Value::Null => Ok(Value::Object(Default::default())),
            _ => Err(UtilsError::NotAMapping {
                name: name.to_string(),
            }),
        }
    }
}
