//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format and
//! destination come from a [`LoggingConfig`], which is usually read from the
//! `logging` section of a [`ConfigStore`], and can be overridden through
//! `DOCVY_LOG*` environment variables.

use crate::config::{fill_object_with, ConfigStore, MergePolicy};
use crate::error::UtilsError;
use crate::paths::{AppPath, PathResolver};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Log file name inside the `app.logs` directory.
pub const LOG_FILE_NAME: &str = "docvy.log";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(UtilsError::LoggingError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where log lines go. `File` writes to [`LoggingConfig::file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
    File,
    Both,
}

impl FromStr for LogOutput {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            "both" => Ok(LogOutput::Both),
            other => Err(UtilsError::LoggingError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', or 'both')",
                other
            ))),
        }
    }
}

/// Logging configuration, normally the `logging` section of a [`ConfigStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_format")]
    pub format: LogFormat,

    #[serde(default = "default_output")]
    pub output: LogOutput,

    /// Log file, used when `output` is `file`
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Colored output; never applied to log files
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `docvy_utils::config = "debug"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> LogFormat {
    LogFormat::Text
}

fn default_output() -> LogOutput {
    LogOutput::Stderr
}

/// `<home>/.docvy/logs/docvy.log`, or a relative fallback when no home
/// directory is known. The directory is only created when logging starts.
fn default_log_file() -> PathBuf {
    match PathResolver::from_env() {
        Ok(resolver) => resolver.path_of(AppPath::Logs).join(LOG_FILE_NAME),
        Err(_) => PathBuf::from(crate::paths::APP_DIR_NAME)
            .join("logs")
            .join(LOG_FILE_NAME),
    }
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Read the `logging` section of `store`, filling gaps from the defaults.
    ///
    /// Uses [`MergePolicy::Presence`] so that `color = false` survives.
    pub fn from_store(store: &ConfigStore) -> Result<Self, UtilsError> {
        let defaults = serde_json::to_value(LoggingConfig::default())?;
        let section = store.get_options(Some("logging"), None).unwrap_or(Value::Null);
        let merged = fill_object_with(&section, &defaults, MergePolicy::Presence);
        Ok(serde_json::from_value(merged)?)
    }

    /// Apply `DOCVY_LOG_FORMAT`, `DOCVY_LOG_OUTPUT` and `DOCVY_LOG_MODULES`.
    /// `DOCVY_LOG` is read later as a complete filter.
    fn with_env_overrides(mut self) -> Result<Self, UtilsError> {
        if let Some(format) = env_value(ENV_FORMAT) {
            self.format = format.parse()?;
        }
        if let Some(output) = env_value(ENV_OUTPUT) {
            self.output = output.parse()?;
        }
        if let Some(modules) = env_value(ENV_MODULES) {
            for entry in modules.split(',') {
                if let Some((module, level)) = entry.split_once('=') {
                    self.modules
                        .insert(module.trim().to_string(), level.trim().to_string());
                }
            }
        }
        Ok(self)
    }

    /// Filter directives: the base level followed by one `module=level` entry
    /// per configured module. `off` silences everything.
    fn directives(&self) -> String {
        let level = self.level.trim();
        if level.eq_ignore_ascii_case("off") {
            return "off".to_string();
        }
        std::iter::once(level.to_string())
            .chain(
                self.modules
                    .iter()
                    .map(|(module, module_level)| format!("{}={}", module, module_level)),
            )
            .collect::<Vec<_>>()
            .join(",")
    }
}

const ENV_FILTER: &str = "DOCVY_LOG";
const ENV_FORMAT: &str = "DOCVY_LOG_FORMAT";
const ENV_OUTPUT: &str = "DOCVY_LOG_OUTPUT";
const ENV_MODULES: &str = "DOCVY_LOG_MODULES";

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (DOCVY_LOG, DOCVY_LOG_FORMAT, DOCVY_LOG_OUTPUT,
///    DOCVY_LOG_MODULES)
/// 2. Configuration
/// 3. Defaults
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), UtilsError> {
    let config = config.cloned().unwrap_or_default().with_env_overrides()?;
    let filter = build_env_filter(&config)?;
    let use_color = config.color && config.output != LogOutput::File;

    let writer = match config.output {
        LogOutput::File => BoxMakeWriter::new(open_log_file(&config.file)?),
        LogOutput::Both => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };

    let base_subscriber = Registry::default().with(filter);
    let result = match config.format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init(),
    };

    result.map_err(|e| UtilsError::LoggingError(format!("Failed to install subscriber: {}", e)))
}

/// Opens the log file for appending, creating the logs directory first.
fn open_log_file(log_file: &Path) -> Result<std::fs::File, UtilsError> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            UtilsError::LoggingError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            UtilsError::LoggingError(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// `DOCVY_LOG` replaces the configured directives entirely.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, UtilsError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_FILTER) {
        return Ok(filter);
    }
    EnvFilter::try_new(config.directives())
        .map_err(|e| UtilsError::LoggingError(format!("Invalid log directive: {}", e)))
}
