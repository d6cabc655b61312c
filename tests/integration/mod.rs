//! Integration tests for the Docvy utilities

mod config_integration;
mod error_chain;
mod home_paths;
mod test_utils;

pub use test_utils::with_home_env;
