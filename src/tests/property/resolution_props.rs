//! Property-based tests for the matching cascade
//!
//! Tests invariants:
//! - Similarity is symmetric, bounded to [0, 1], and 1.0 only for equal strings
//! - The length and shared-character bounds never under-estimate the real
//!   similarity, and the shared-character bound is the tighter of the two
//! - A fuzzy match always scores strictly above the threshold
//! - Resolving the same input twice gives the same entry and score

use proptest::prelude::*;

use crate::core::resolver::similarity::{similarity, similarity_upper_bound, CharBag};
use crate::core::resolver::{MatchStage, Resolution};
use crate::tests::common::sample_engine;

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{0,12}"
}

proptest! {
    #[test]
    fn prop_similarity_symmetric(a in arb_word(), b in arb_word()) {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn prop_similarity_bounded(a in arb_word(), b in arb_word()) {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert_eq!(score == 1.0, a == b);
    }

    #[test]
    fn prop_upper_bound_holds(a in arb_word(), b in arb_word()) {
        let bound = similarity_upper_bound(a.chars().count(), b.chars().count());
        prop_assert!(similarity(&a, &b) <= bound);
    }

    #[test]
    fn prop_char_bag_bound_holds(a in "[a-e]{0,10}", b in "[a-e]{0,10}") {
        let bound = CharBag::new(&a).similarity_bound(&b);
        prop_assert!(similarity(&a, &b) <= bound);
        prop_assert!(bound <= similarity_upper_bound(a.chars().count(), b.chars().count()));
        prop_assert_eq!(bound, CharBag::new(&b).similarity_bound(&a));
    }

    #[test]
    fn prop_fuzzy_above_threshold(word in "[a-z]{3,10}") {
        let engine = sample_engine();
        if let Some(resolution) = engine.resolve(&word) {
            if resolution.stage == MatchStage::Fuzzy {
                prop_assert!(resolution.similarity > 0.8);
            } else {
                prop_assert_eq!(resolution.similarity, 1.0);
            }
        }
    }

    #[test]
    fn prop_resolution_deterministic(word in "[a-z]{1,10}") {
        let engine = sample_engine();
        let cold = engine.resolve(&word);
        let warm = engine.resolve(&word);
        engine.reduce_cache_size();
        let cleared = engine.resolve(&word);

        let summary = |r: Option<Resolution>| {
            r.map(|r| (r.entry.headword.clone(), r.stage, r.similarity))
        };
        let cold = summary(cold);
        prop_assert_eq!(&cold, &summary(warm));
        prop_assert_eq!(&cold, &summary(cleared));
    }
}
