//! Application path resolution against the process home directory

use docvy_utils::{get_path, AppPath, PathResolver};
use std::fs;
use tempfile::TempDir;

use crate::integration::with_home_env;

#[test]
fn test_get_path_uses_home_env() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |home| {
        let app_home = get_path("app.home").unwrap().unwrap();
        assert_eq!(app_home, home.join(".docvy"));

        let logs = get_path("app.logs").unwrap().unwrap();
        let plugins = get_path("app.plugins").unwrap().unwrap();
        let cache_plugins = get_path("app.cache.plugins").unwrap().unwrap();
        assert_eq!(logs, home.join(".docvy").join("logs"));
        assert_eq!(plugins, home.join(".docvy").join("plugins"));
        assert_eq!(cache_plugins, home.join(".docvy").join("cache").join("plugins"));
        assert!(cache_plugins.is_dir());
    });
}

#[test]
fn test_get_path_unknown_names() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |home| {
        assert!(get_path("").unwrap().is_none());
        assert!(get_path("non-existing-path").unwrap().is_none());
        assert!(!home.join(".docvy").exists());
    });
}

#[test]
fn test_get_path_recreates_logs() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |_| {
        let logs = get_path("app.logs").unwrap().unwrap();
        let moved = logs.with_file_name("logs_tmp");
        fs::rename(&logs, &moved).unwrap();
        assert!(!logs.exists());

        let logs = get_path("app.logs").unwrap().unwrap();
        assert!(logs.exists());
        assert!(moved.exists());
    });
}

#[test]
fn test_from_env_matches_explicit_resolver() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |home| {
        let from_env = PathResolver::from_env().unwrap();
        let explicit = PathResolver::new(home);
        for path in AppPath::ALL {
            assert_eq!(from_env.path_of(path), explicit.path_of(path));
        }
    });
}
