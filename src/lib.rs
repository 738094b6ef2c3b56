/// Wordlens - lexical resolution engine for vocabulary learning
///
/// Maps raw words and surrounding text to dictionary entries and the sense
/// that fits: normalization, morphology, exact/stem/fuzzy matching, and
/// context-based sense selection over an in-memory lexicon.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub use crate::core::engine::{EngineConfig, LexiconEngine, LexiconStatus, Lookup};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
