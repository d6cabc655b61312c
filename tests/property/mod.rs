//! Property-based tests for configuration merging
