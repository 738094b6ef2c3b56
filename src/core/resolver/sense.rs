//! Sense selection: pick the definition of a polysemous entry that best
//! fits the surrounding text.
//!
//! # Scoring
//!
//! For each context keyword `k` and definition `d`:
//!
//! | Where `k` is found                            | Points |
//! |-----------------------------------------------|--------|
//! | `d.keywords` (lower-cased, or by lemma)       | 2.0    |
//! | keywords extracted from `d.meaning`           | 1.0    |
//! | keywords extracted from any of `d.examples`   | 0.5    |
//!
//! The strictly highest total wins; ties go to the earliest definition, so
//! the editorial "primary sense first" order decides ambiguous cases.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::lexicon::{Definition, LexiconEntry};
use crate::core::morphology::lemma_of;
use crate::core::preprocess::extract_keywords_with;

pub const DEFAULT_CONTEXT_KEYWORD_LIMIT: usize = 10;
pub const DEFAULT_DEFINITION_KEYWORD_LIMIT: usize = 20;

const DEFINITION_KEYWORD_WEIGHT: f64 = 2.0;
const MEANING_WEIGHT: f64 = 1.0;
const EXAMPLE_WEIGHT: f64 = 0.5;

/// Keyword limits used during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenseConfig {
    /// Keywords taken from the lookup context.
    pub context_keyword_limit: usize,
    /// Keywords taken from each meaning or example text.
    pub definition_keyword_limit: usize,
}

impl Default for SenseConfig {
    fn default() -> Self {
        Self {
            context_keyword_limit: DEFAULT_CONTEXT_KEYWORD_LIMIT,
            definition_keyword_limit: DEFAULT_DEFINITION_KEYWORD_LIMIT,
        }
    }
}

/// Where the selector gets its keywords and lemmas from.
///
/// The engine implements this over its lookup caches; [`Uncached`] computes
/// everything directly.
pub trait KeywordSource {
    fn keywords(&self, text: &str, limit: usize) -> Arc<Vec<String>>;
    fn lemma(&self, word: &str) -> String;
}

/// A [`KeywordSource`] with no memoization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uncached;

impl KeywordSource for Uncached {
    fn keywords(&self, text: &str, limit: usize) -> Arc<Vec<String>> {
        Arc::new(extract_keywords_with(text, limit, lemma_of))
    }

    fn lemma(&self, word: &str) -> String {
        lemma_of(word)
    }
}

/// The chosen definition and its position in the entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SenseChoice<'e> {
    pub index: usize,
    pub definition: &'e Definition,
    /// Zero when the entry has a single definition (no scoring ran).
    pub score: f64,
}

/// Select the definition of `entry` that best matches `context`.
///
/// Returns `None` only for an entry with no definitions, which the entry
/// constructors never produce.
pub fn select_sense<'e, S>(
    entry: &'e LexiconEntry,
    context: &str,
    config: &SenseConfig,
    source: &S,
) -> Option<SenseChoice<'e>>
where
    S: KeywordSource + ?Sized,
{
    let first = entry.definitions.first()?;
    if entry.definitions.len() == 1 {
        return Some(SenseChoice {
            index: 0,
            definition: first,
            score: 0.0,
        });
    }

    let context_keywords = source.keywords(context, config.context_keyword_limit);

    let mut best = SenseChoice {
        index: 0,
        definition: first,
        score: score_definition(first, &context_keywords, config, source),
    };
    for (index, definition) in entry.definitions.iter().enumerate().skip(1) {
        let score = score_definition(definition, &context_keywords, config, source);
        if score > best.score {
            best = SenseChoice {
                index,
                definition,
                score,
            };
        }
    }

    log::debug!(
        "Selected sense {} of '{}' (score {:.1})",
        best.index,
        entry.headword,
        best.score
    );
    Some(best)
}

/// Score one definition against already extracted context keywords.
pub fn score_definition<S>(
    definition: &Definition,
    context_keywords: &[String],
    config: &SenseConfig,
    source: &S,
) -> f64
where
    S: KeywordSource + ?Sized,
{
    if context_keywords.is_empty() {
        return 0.0;
    }

    let own: HashSet<String> = definition
        .keywords
        .iter()
        .flat_map(|k| [k.clone(), source.lemma(k)])
        .collect();

    let meaning = source.keywords(&definition.meaning, config.definition_keyword_limit);

    let examples: HashSet<String> = definition
        .examples
        .iter()
        .flat_map(|ex| {
            source
                .keywords(ex, config.definition_keyword_limit)
                .iter()
                .cloned()
                .collect::<Vec<_>>()
        })
        .collect();

    context_keywords
        .iter()
        .map(|k| {
            let mut points = 0.0;
            if own.contains(k) {
                points += DEFINITION_KEYWORD_WEIGHT;
            }
            if meaning.contains(k) {
                points += MEANING_WEIGHT;
            }
            if examples.contains(k) {
                points += EXAMPLE_WEIGHT;
            }
            points
        })
        .sum()
}
