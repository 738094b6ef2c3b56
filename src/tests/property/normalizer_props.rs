//! Property-based tests for normalization and tokenizing
//!
//! Tests invariants:
//! - A normalized token is lower-case with no surrounding punctuation
//! - `normalize` is idempotent
//! - Input without letters never yields a token
//! - Tokenizing the same text twice yields the same tokens

use proptest::prelude::*;

use crate::core::preprocess::{normalize, tokenize};

// ============================================================================
// Strategies
// ============================================================================

/// Printable ASCII, including punctuation and runs of spaces.
fn arb_raw() -> impl Strategy<Value = String> {
    "[ -~]{0,40}"
}

/// Text made only of digits, whitespace and punctuation.
fn arb_letterless() -> impl Strategy<Value = String> {
    "[0-9 .,;:!?()\\-]{0,30}"
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_normalized_shape(raw in arb_raw()) {
        if let Some(token) = normalize(&raw) {
            let s = token.as_str();
            prop_assert!(!s.is_empty());
            prop_assert_eq!(s, s.to_lowercase());
            prop_assert!(s.chars().next().is_some_and(char::is_alphanumeric));
            prop_assert!(s.chars().last().is_some_and(char::is_alphanumeric));
            prop_assert!(!s.contains("  "));
            prop_assert!(s.chars().any(char::is_alphabetic));
        }
    }

    #[test]
    fn prop_normalize_idempotent(raw in arb_raw()) {
        if let Some(token) = normalize(&raw) {
            let again = normalize(&token);
            prop_assert_eq!(again.as_ref(), Some(&token));
        }
    }

    #[test]
    fn prop_letterless_input_rejected(raw in arb_letterless()) {
        prop_assert!(normalize(&raw).is_none());
        prop_assert_eq!(tokenize(&raw).count(), 0);
    }

    #[test]
    fn prop_tokenize_repeatable(text in arb_raw()) {
        let first: Vec<_> = tokenize(&text).collect();
        let second: Vec<_> = tokenize(&text).collect();
        prop_assert_eq!(&first, &second);

        // A cloned iterator restarts from the same position
        let mut tokens = tokenize(&text);
        let _ = tokens.next();
        let rest_a: Vec<_> = tokens.clone().collect();
        let rest_b: Vec<_> = tokens.collect();
        prop_assert_eq!(rest_a, rest_b);
    }

    #[test]
    fn prop_tokens_are_lowercase_words(text in arb_raw()) {
        for token in tokenize(&text) {
            prop_assert_eq!(token.as_str(), token.to_lowercase());
            prop_assert!(token.chars().any(char::is_alphabetic));
            prop_assert!(!token.contains(' '));
        }
    }
}
