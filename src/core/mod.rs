//! Core engine modules.
//!
//! Data flows raw text -> `preprocess` -> `resolver` (backed by `lexicon`,
//! `morphology` and `cache`) -> matched entry -> sense selection. The
//! `engine` module ties these together behind one service object.

pub mod cache;
pub mod engine;
pub mod lexicon;
pub mod logging;
pub mod morphology;
pub mod preprocess;
pub mod resolver;

pub use engine::{EngineConfig, LexiconEngine, LexiconStatus, Lookup, Occurrence, TokenResolution};
