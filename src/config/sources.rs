//! Configuration sources layered by [`super::ConfigLoader`].

pub mod environment;
pub mod global_file;
pub mod rc_file;
