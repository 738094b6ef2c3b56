//! Keyword Extraction
//!
//! Reduces a piece of text to its most frequent content stems. Used by the
//! sense selector on both the lookup context and the definition texts.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::normalizer::tokenize;
use crate::core::morphology;

/// Tokens shorter than this (in characters) are never keywords.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Common English function words excluded from keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    // Articles and determiners
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each",
    "every",
    // Pronouns
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself",
    "he", "him", "his", "himself", "she", "her", "hers", "herself", "it",
    "its", "itself", "we", "us", "our", "ours", "they", "them", "their",
    "theirs", "what", "which", "who", "whom", "whose",
    // Auxiliaries and modals
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "can", "could", "will",
    "would", "shall", "should", "may", "might", "must",
    // Prepositions
    "about", "above", "after", "at", "before", "below", "between", "by",
    "down", "during", "for", "from", "in", "into", "of", "off", "on", "out",
    "over", "through", "to", "under", "until", "up", "with",
    // Conjunctions
    "and", "but", "or", "nor", "so", "yet", "because", "if", "than", "then",
    "while",
    // Adverbs and misc
    "not", "no", "only", "very", "too", "also", "just", "there", "here",
    "when", "where", "why", "how", "all", "both", "few", "more", "most",
    "now",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Check if a (lower-case) word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Extract up to `limit` keyword stems from `text` using the default
/// (uncached) lemmatizer.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    extract_keywords_with(text, limit, morphology::lemma_of)
}

/// Extract up to `limit` keyword stems from `text`, stemming with `stem`.
///
/// Tokens shorter than [`MIN_KEYWORD_LEN`] and stop words are dropped, the
/// rest are reduced to their stems and ranked by frequency. Ties keep the
/// order in which each stem first occurred.
pub fn extract_keywords_with<F>(text: &str, limit: usize, mut stem: F) -> Vec<String>
where
    F: FnMut(&str) -> String,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for token in tokenize(text) {
        if token.char_len() < MIN_KEYWORD_LEN || is_stop_word(&token) {
            continue;
        }
        *counts.entry(stem(&token)).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // Stable sort: equal counts stay in first-occurrence order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(limit).map(|(stem, _)| stem).collect()
}
