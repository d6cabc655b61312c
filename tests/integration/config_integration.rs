//! Integration tests for configuring stores from named sources

use docvy_utils::{ConfigLoader, ConfigStore};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

use crate::integration::with_home_env;

#[test]
fn test_configure_by_name_reads_home_sources() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |home| {
        let global_dir = home.join(".config").join("docvyapp");
        fs::create_dir_all(&global_dir).unwrap();
        fs::write(
            global_dir.join("config.toml"),
            "[server]\nport = 8080\nhost = \"global\"\n",
        )
        .unwrap();
        fs::write(home.join(".docvyapprc"), "[server]\nhost = \"rc\"\n").unwrap();

        let store = ConfigStore::new().configure("docvyapp").unwrap();
        assert_eq!(
            store.get_options(Some("server"), None),
            Some(json!({"port": 8080, "host": "rc"}))
        );
    });
}

#[test]
fn test_configured_stores_are_independent() {
    let test_dir = TempDir::new().unwrap();
    let base = ConfigStore::new();
    let first = base.configure(json!({"server": {"port": 1}})).unwrap();

    let store_file = test_dir.path().join("second.json");
    fs::write(&store_file, r#"{"server": {"port": 2}}"#).unwrap();
    let second = base.configure_from_file(&store_file).unwrap();

    assert_eq!(first.get_options(Some("server.port"), None), Some(json!(1)));
    assert_eq!(second.get_options(Some("server.port"), None), Some(json!(2)));
    assert_eq!(base.get_options(None, None), Some(json!({})));
}

#[test]
fn test_per_call_overrides_over_loaded_defaults() {
    let test_dir = TempDir::new().unwrap();
    fs::write(
        test_dir.path().join(".docvyrc"),
        "[plugins]\nenabled = true\ndirectory = \"plugins\"\n[plugins.registry]\nurl = \"https://registry\"\ntimeout = 30\n",
    )
    .unwrap();
    let loader = ConfigLoader::new("docvy")
        .home(test_dir.path())
        .working_dir(test_dir.path())
        .without_environment();
    let store = ConfigStore::new().configure(loader).unwrap();

    let options = store
        .get_options(Some("plugins"), Some(&json!({"registry": {"timeout": 5}})))
        .unwrap();
    assert_eq!(
        options,
        json!({
            "enabled": true,
            "directory": "plugins",
            "registry": {"url": "https://registry", "timeout": 5}
        })
    );
}

#[test]
fn test_mixed_case_keys_survive_named_and_file_sources() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, |home| {
        fs::write(home.join(".docvycaserc"), "[Editor]\ntabWidth = 4\n").unwrap();
        let settings = home.join("settings.json");
        fs::write(&settings, r#"{"appName": "x", "Nested": {"innerKey": 1}}"#).unwrap();

        let named = ConfigStore::new().configure("docvycase").unwrap();
        assert_eq!(named.get_options(Some("Editor.tabWidth"), None), Some(json!(4)));

        let from_file = ConfigStore::new().configure_from_file(&settings).unwrap();
        assert_eq!(
            from_file.get_options(Some("Nested.innerKey"), None),
            Some(json!(1))
        );
        assert_eq!(from_file.get_options(Some("appName"), None), Some(json!("x")));
    });
}
