//! Global config file source: $XDG_CONFIG_HOME/<name>/config.* or ~/.config/<name>/config.*

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory holding per-application global config files.
/// Uses XDG_CONFIG_HOME when set, otherwise `<home>/.config`.
pub fn config_home(home: Option<&Path>) -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".config")))
}

/// Add `<config_home>/<name>/config` to the builder. The file format is
/// picked from whichever known extension exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    name: &str,
    config_home: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(config_home) = config_home else {
        return Ok(builder);
    };
    let app_dir = config_home.join(name);
    if !app_dir.is_dir() {
        debug!(
            config_dir = %app_dir.display(),
            "No global configuration directory"
        );
        return Ok(builder);
    }
    let base = app_dir.join("config");
    Ok(builder.add_source(File::from(base.as_path()).required(false)))
}
