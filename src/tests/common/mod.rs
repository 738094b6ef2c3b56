//! Common Test Utilities
//!
//! Shared fixtures for building entries, stores and engines.

pub mod fixtures;

pub use fixtures::*;
