//! Shared test utilities for integration tests
//!
//! Tests that read `HOME` or `XDG_CONFIG_HOME` run through [`with_home_env`]
//! so they never race each other or see the developer's real home directory.

use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static HOME_ENV_MUTEX: Mutex<()> = Mutex::new(());

const HOME_VARS: [&str; 2] = ["HOME", "XDG_CONFIG_HOME"];

/// Holds the env lock and puts the saved variables back on drop, including
/// when the test body panics.
struct HomeGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl HomeGuard {
    fn enter(home: &Path) -> Self {
        let lock = HOME_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved = HOME_VARS
            .iter()
            .map(|&name| (name, std::env::var_os(name)))
            .collect();
        std::env::set_var("HOME", home);
        std::env::remove_var("XDG_CONFIG_HOME");
        Self { saved, _lock: lock }
    }
}

impl Drop for HomeGuard {
    fn drop(&mut self) {
        for (name, value) in self.saved.drain(..) {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME set to a fresh `home` directory under `test_dir`.
pub fn with_home_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    let _guard = HomeGuard::enter(&home);
    f(&home)
}
