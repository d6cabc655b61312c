//! Application-specific paths.
//!
//! Every path lives under `<home>/.docvy`. Resolving a path creates its
//! directory chain first, so callers can write into the result right away.
//! Creation is idempotent and safe to race: an existing directory counts as
//! success.

use crate::error::UtilsError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Directory under the home directory holding all application data.
pub const APP_DIR_NAME: &str = ".docvy";

/// Symbolic application path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPath {
    Home,
    Cache,
    CachePlugins,
    Logs,
    Plugins,
}

impl AppPath {
    pub const ALL: [AppPath; 5] = [
        AppPath::Home,
        AppPath::Cache,
        AppPath::CachePlugins,
        AppPath::Logs,
        AppPath::Plugins,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppPath::Home => "app.home",
            AppPath::Cache => "app.cache",
            AppPath::CachePlugins => "app.cache.plugins",
            AppPath::Logs => "app.logs",
            AppPath::Plugins => "app.plugins",
        }
    }

    /// Segments below the application root.
    fn segments(self) -> &'static [&'static str] {
        match self {
            AppPath::Home => &[],
            AppPath::Cache => &["cache"],
            AppPath::CachePlugins => &["cache", "plugins"],
            AppPath::Logs => &["logs"],
            AppPath::Plugins => &["plugins"],
        }
    }
}

impl fmt::Display for AppPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppPath {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppPath::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UtilsError::UnknownPath(s.to_string()))
    }
}

/// Home directory of the current user, if the platform reports one.
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
}

/// Resolves [`AppPath`]s against one home directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    home: PathBuf,
}

impl PathResolver {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolver rooted at the current user's home directory.
    pub fn from_env() -> Result<Self, UtilsError> {
        home_dir().map(Self::new).ok_or(UtilsError::HomeNotFound)
    }

    /// `<home>/.docvy`
    pub fn root(&self) -> PathBuf {
        self.home.join(APP_DIR_NAME)
    }

    /// Absolute path for `path`, without touching the filesystem.
    pub fn path_of(&self, path: AppPath) -> PathBuf {
        path.segments()
            .iter()
            .fold(self.root(), |acc, segment| acc.join(segment))
    }

    /// Absolute path for `path`, creating the directory chain if needed.
    pub fn resolve(&self, path: AppPath) -> Result<PathBuf, UtilsError> {
        let target = self.path_of(path);
        ensure_dir(&target)?;
        Ok(target)
    }

    /// Resolve a symbolic name. Unknown names give `Ok(None)`.
    pub fn get_path(&self, name: &str) -> Result<Option<PathBuf>, UtilsError> {
        match name.parse::<AppPath>() {
            Ok(path) => self.resolve(path).map(Some),
            Err(_) => Ok(None),
        }
    }
}

/// [`PathResolver::get_path`] against the current user's home directory.
pub fn get_path(name: &str) -> Result<Option<PathBuf>, UtilsError> {
    if name.parse::<AppPath>().is_err() {
        return Ok(None);
    }
    PathResolver::from_env()?.get_path(name)
}

fn ensure_dir(path: &Path) -> Result<(), UtilsError> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| UtilsError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Created application directory");
    Ok(())
}
