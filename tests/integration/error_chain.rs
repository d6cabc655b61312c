//! Integration tests for defined error kinds used across crate boundaries

use docvy_utils::{define_error, DefinedError, ErrorKind, UtilsError};
use std::error::Error;

fn load_plugin(kind: &ErrorKind) -> Result<(), DefinedError> {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "plugin.json missing");
    Err(kind.caused_by(io))
}

#[test]
fn test_error_chain_walks_to_root_cause() {
    let plugin_error = define_error("eplugin", "Plugin could not be loaded");
    let startup_error = define_error("estartup", "Startup failed");

    let err = load_plugin(&plugin_error)
        .map_err(|e| startup_error.caused_by(e))
        .unwrap_err();

    assert!(err.is_kind(&startup_error));
    let chain: Vec<String> = std::iter::successors(Some(&err as &(dyn Error + 'static)), |e| (*e).source())
        .map(|e| e.to_string())
        .collect();
    assert_eq!(
        chain,
        vec![
            "ESTARTUP: Startup failed".to_string(),
            "EPLUGIN: Plugin could not be loaded".to_string(),
            "plugin.json missing".to_string(),
        ]
    );
    assert!(plugin_error.matches(err.source().unwrap()));
}

#[test]
fn test_defined_error_boxes_like_any_error() {
    let kind = define_error("enotready", "Not ready");
    let boxed: Box<dyn Error + Send + Sync> = Box::new(kind.error());
    assert!(kind.matches(&*boxed));

    let utils: Box<dyn Error + Send + Sync> = Box::new(UtilsError::HomeNotFound);
    assert!(!kind.matches(&*utils));
}
