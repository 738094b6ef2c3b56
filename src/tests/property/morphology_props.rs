//! Property-based tests for the morphology analyzer
//!
//! Tests invariants:
//! - `lemma_of` is idempotent and case-insensitive
//! - Stem candidates are unique and never equal the input
//! - Rule stems are always shorter than the word they came from
//! - Generated surface forms include the lemma itself

use std::collections::HashSet;

use proptest::prelude::*;

use crate::core::morphology::{lemma_of, stem_candidates, surface_forms_of};

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{1,14}"
}

/// Words ending in a common inflectional suffix.
fn arb_inflected() -> impl Strategy<Value = String> {
    ("[a-z]{2,8}", prop::sample::select(vec!["s", "es", "ies", "ing", "ed", "ly", "er", "est"]))
        .prop_map(|(stem, suffix)| format!("{stem}{suffix}"))
}

proptest! {
    #[test]
    fn prop_lemma_idempotent(word in arb_word()) {
        let lemma = lemma_of(&word);
        prop_assert_eq!(lemma_of(&lemma), lemma);
    }

    #[test]
    fn prop_lemma_idempotent_on_inflected(word in arb_inflected()) {
        let lemma = lemma_of(&word);
        prop_assert_eq!(lemma_of(&lemma), lemma);
    }

    #[test]
    fn prop_lemma_ignores_case(word in arb_word()) {
        prop_assert_eq!(lemma_of(&word.to_uppercase()), lemma_of(&word));
    }

    #[test]
    fn prop_candidates_unique(word in arb_inflected()) {
        let candidates = stem_candidates(&word);
        let mut seen = HashSet::new();
        for candidate in &candidates {
            prop_assert!(candidate.form != word);
            prop_assert!(seen.insert(candidate.form.clone()), "duplicate {}", candidate.form);
        }
    }

    #[test]
    fn prop_candidates_shrink_the_word(word in arb_inflected()) {
        for candidate in stem_candidates(&word) {
            if !candidate.is_irregular() {
                prop_assert!(candidate.form.len() < word.len());
            }
        }
    }

    #[test]
    fn prop_surface_forms_contain_lemma(lemma in arb_word()) {
        prop_assert!(surface_forms_of(&lemma).contains(&lemma));
    }
}
