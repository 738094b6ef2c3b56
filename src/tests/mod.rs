//! Crate-internal test suites.
//!
//! Unit tests live next to the code they cover; this tree holds the shared
//! fixtures and the property-based suites that cut across modules.

pub mod common;
mod property;
