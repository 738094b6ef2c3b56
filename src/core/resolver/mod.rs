//! Resolver
//!
//! Maps a raw word to a lexicon entry through the exact -> stem -> fuzzy
//! cascade, and picks the entry's sense that fits the surrounding text.

pub mod cascade;
pub mod sense;
pub mod similarity;

pub use cascade::{
    cached_lemma, MatchStage, Resolution, Resolver, ResolverConfig, ResolverCounts, Suggestion,
};
pub use sense::{select_sense, KeywordSource, SenseChoice, SenseConfig, Uncached};
pub use similarity::similarity;
