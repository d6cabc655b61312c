//! Environment source: `<NAME>__KEY__SUBKEY=value`.
//!
//! The double underscore after the prefix keeps `DOCVY_LOG*` and other
//! single-underscore variables out of the configuration tree.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Upper-cased prefix for `name`, with non-alphanumerics mapped to `_`.
pub fn env_prefix(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Keys are lowercased, `__` separates nesting levels, and scalar values are
/// parsed into booleans or numbers when they look like one.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    name: &str,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(&env_prefix(name))
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}
