//! Core data models for the lexicon.
//!
//! - [`LexiconEntry`]: one headword with its ordered senses
//! - [`Definition`]: a single sense, owned by exactly one entry
//! - [`PartOfSpeech`], [`Difficulty`]: closed tag sets used by the import feed
//!
//! # Design Notes
//!
//! - The headword stored on an entry is always its canonical key (normalized,
//!   lower-cased). Construction goes through [`LexiconEntry::new`], which
//!   enforces that and the non-empty definition rule.
//! - Definition order is meaningful: the first definition is the default
//!   sense and wins every scoring tie in the sense selector.
//! - Entries live behind `Arc` once inside a store, so a loaded entry is never
//!   mutated in place; the extension path builds a new entry and republishes it.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{LexiconError, Result};
use crate::core::preprocess::normalize;

// ============================================================================
// PartOfSpeech
// ============================================================================

/// Part-of-speech tag attached to a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    #[serde(alias = "n")]
    Noun,
    #[serde(alias = "v")]
    Verb,
    #[serde(alias = "adj")]
    Adjective,
    #[serde(alias = "adv")]
    Adverb,
    #[serde(alias = "pron")]
    Pronoun,
    #[serde(alias = "prep")]
    Preposition,
    #[serde(alias = "conj")]
    Conjunction,
    #[serde(alias = "det")]
    Determiner,
    #[serde(alias = "interj")]
    Interjection,
    Phrase,
    #[serde(other)]
    Other,
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Noun => "n.",
            Self::Verb => "v.",
            Self::Adjective => "adj.",
            Self::Adverb => "adv.",
            Self::Pronoun => "pron.",
            Self::Preposition => "prep.",
            Self::Conjunction => "conj.",
            Self::Determiner => "det.",
            Self::Interjection => "interj.",
            Self::Phrase => "phr.",
            Self::Other => "misc.",
        };
        f.write_str(tag)
    }
}

// ============================================================================
// Difficulty
// ============================================================================

/// Difficulty tier of an entry, on the CEFR scale.
///
/// Ordered from easiest to hardest so tiers compare naturally
/// (`Difficulty::A1 < Difficulty::C2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "a1")]
    A1,
    #[serde(alias = "a2")]
    A2,
    #[serde(alias = "b1")]
    B1,
    #[serde(alias = "b2")]
    B2,
    #[serde(alias = "c1")]
    C1,
    #[serde(alias = "c2")]
    C2,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::B1
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ============================================================================
// Definition
// ============================================================================

/// One sense of a headword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub part_of_speech: PartOfSpeech,
    /// Primary-language meaning. Never empty.
    pub meaning: String,
    /// Optional secondary-language meaning (translation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_meaning: Option<String>,
    /// Example sentences, in editorial order.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Lower-cased context keywords, used only for disambiguation.
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

impl Definition {
    /// Create a definition with no examples or keywords.
    pub fn new(part_of_speech: PartOfSpeech, meaning: impl Into<String>) -> Self {
        Self {
            part_of_speech,
            meaning: meaning.into(),
            secondary_meaning: None,
            examples: Vec::new(),
            keywords: BTreeSet::new(),
        }
    }

    /// Builder method to set the secondary-language meaning.
    pub fn with_secondary(mut self, meaning: impl Into<String>) -> Self {
        let meaning = meaning.into();
        self.secondary_meaning = (!meaning.trim().is_empty()).then_some(meaning);
        self
    }

    /// Builder method to append example sentences.
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Builder method to add context keywords (stored lower-cased).
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(
            keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty()),
        );
        self
    }

    /// Check the definition invariants.
    pub fn validate(&self) -> Result<()> {
        if self.meaning.trim().is_empty() {
            return Err(LexiconError::invalid("definition meaning is empty"));
        }
        Ok(())
    }
}

// ============================================================================
// LexiconEntry
// ============================================================================

/// A dictionary entry: a canonical headword and its ordered senses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Canonical lower-cased headword; the store key.
    pub headword: String,
    /// Phonetic transcriptions (IPA or similar), possibly none.
    pub phonetics: Vec<String>,
    /// Senses in editorial order; the first is the default sense.
    pub definitions: Vec<Definition>,
    /// Frequency rank: higher means more common.
    pub frequency_rank: u32,
    pub difficulty: Difficulty,
    pub tags: BTreeSet<String>,
}

impl LexiconEntry {
    /// Create an entry, canonicalising the headword.
    ///
    /// Fails when the headword has no alphabetic content, when there are no
    /// definitions, or when any definition has an empty meaning.
    pub fn new(headword: &str, definitions: Vec<Definition>) -> Result<Self> {
        let key = normalize(headword)
            .ok_or_else(|| LexiconError::invalid(format!("headword {headword:?} has no letters")))?;

        if definitions.is_empty() {
            return Err(LexiconError::invalid(format!(
                "entry '{key}' has no definitions"
            )));
        }
        for definition in &definitions {
            definition.validate()?;
        }

        Ok(Self {
            headword: key.into_inner(),
            phonetics: Vec::new(),
            definitions,
            frequency_rank: 0,
            difficulty: Difficulty::default(),
            tags: BTreeSet::new(),
        })
    }

    /// Builder method to set phonetic transcriptions.
    pub fn with_phonetics<I, S>(mut self, phonetics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phonetics = phonetics
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.trim().is_empty())
            .collect();
        self
    }

    /// Builder method to set the frequency rank.
    pub fn with_frequency_rank(mut self, rank: u32) -> Self {
        self.frequency_rank = rank;
        self
    }

    /// Builder method to set the difficulty tier.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Builder method to add free-form tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.extend(
            tags.into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty()),
        );
        self
    }

    /// Re-check the invariants `new` established.
    ///
    /// Fields are public, so an entry built or edited by hand is checked
    /// again before it enters a store.
    pub fn validate(&self) -> Result<()> {
        match normalize(&self.headword) {
            Some(key) if key == self.headword.as_str() => {}
            _ => {
                return Err(LexiconError::invalid(format!(
                    "headword {:?} is not in canonical form",
                    self.headword
                )))
            }
        }
        if self.definitions.is_empty() {
            return Err(LexiconError::invalid(format!(
                "entry '{}' has no definitions",
                self.headword
            )));
        }
        self.definitions.iter().try_for_each(Definition::validate)
    }

    /// The default sense (first definition).
    pub fn primary_definition(&self) -> Option<&Definition> {
        self.definitions.first()
    }

    /// Return a copy with extra definitions and tags appended.
    ///
    /// Existing definitions keep their positions, so the default sense does
    /// not change.
    pub fn extended(&self, definitions: Vec<Definition>, tags: &[String]) -> Result<Self> {
        for definition in &definitions {
            definition.validate()?;
        }
        let mut entry = self.clone();
        entry.definitions.extend(definitions);
        Ok(entry.with_tags(tags))
    }
}
