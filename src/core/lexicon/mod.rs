//! Lexicon Store
//!
//! Entry models, the in-memory store, and the bulk import feed.

pub mod error;
pub mod feed;
pub mod models;
pub mod store;

pub use error::{LexiconError, Result};
pub use feed::{load_feed, parse_feed, FeedFormat, FeedRecord, LoadReport, SkippedRecord};
pub use models::{Definition, Difficulty, LexiconEntry, PartOfSpeech};
pub use store::LexiconStore;
