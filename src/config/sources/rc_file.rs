//! rc file source: `.<name>rc` (TOML) in a given directory.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};

pub fn rc_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!(".{}rc", name))
}

/// Add `<dir>/.<name>rc` to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    name: &str,
    dir: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(dir) = dir else {
        return Ok(builder);
    };
    let path = rc_path(dir, name);
    if !path.is_file() {
        return Ok(builder);
    }
    Ok(builder.add_source(
        File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(false),
    ))
}
