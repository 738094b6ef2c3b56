//! Test Fixtures
//!
//! A small lexicon covering the common lookup paths: an exact hit, an
//! inflected form, a misspelling, an irregular plural and a two-sense entry.

use crate::core::engine::{EngineConfig, LexiconEngine};
use crate::core::lexicon::{Definition, Difficulty, LexiconEntry, LexiconStore, PartOfSpeech};

// =============================================================================
// Entry Fixtures
// =============================================================================

/// Single-sense entry with the given headword and meaning.
pub fn simple_entry(headword: &str, part_of_speech: PartOfSpeech, meaning: &str) -> LexiconEntry {
    LexiconEntry::new(headword, vec![Definition::new(part_of_speech, meaning)])
        .expect("fixture entry is valid")
}

/// "bank" with a financial sense first and a river sense second.
pub fn bank_entry() -> LexiconEntry {
    LexiconEntry::new(
        "bank",
        vec![
            Definition::new(PartOfSpeech::Noun, "an institution that keeps money")
                .with_keywords(["money", "deposit", "loan", "account"])
                .with_examples(["She opened an account at the bank."]),
            Definition::new(PartOfSpeech::Noun, "the land alongside a river")
                .with_keywords(["river", "shore", "water"])
                .with_examples(["They fished from the grassy bank."]),
        ],
    )
    .expect("fixture entry is valid")
    .with_frequency_rank(900)
    .with_difficulty(Difficulty::A2)
}

// =============================================================================
// Store Fixtures
// =============================================================================

/// A handful of entries, in load order.
pub fn sample_store() -> LexiconStore {
    [
        bank_entry(),
        simple_entry("run", PartOfSpeech::Verb, "move quickly on foot").with_frequency_rank(800),
        simple_entry("receive", PartOfSpeech::Verb, "be given something").with_frequency_rank(500),
        simple_entry("child", PartOfSpeech::Noun, "a young human being").with_frequency_rank(700),
        simple_entry("make", PartOfSpeech::Verb, "form something by putting parts together"),
    ]
    .into_iter()
    .collect()
}

/// Engine with default configuration over [`sample_store`].
pub fn sample_engine() -> LexiconEngine {
    LexiconEngine::with_store(EngineConfig::default(), sample_store())
}
