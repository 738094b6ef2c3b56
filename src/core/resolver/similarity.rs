//! Normalized edit-distance similarity, plus the cheap upper bounds the
//! fuzzy stage uses to skip keys without scoring them.

use std::cmp::Ordering;

/// Similarity in `[0.0, 1.0]`: `1 - distance / max(len(a), len(b))`.
///
/// Distance is optimal string alignment (insert, delete, substitute, and
/// swap of two adjacent characters), counted in characters. Two empty
/// strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - strsim::osa_distance(a, b) as f64 / longest as f64
}

/// Best similarity two strings of these lengths could possibly reach.
///
/// Every length difference costs at least one edit, so keys whose bound is
/// already at or below the threshold can be skipped without scoring.
pub fn similarity_upper_bound(len_a: usize, len_b: usize) -> f64 {
    let longest = len_a.max(len_b);
    if longest == 0 {
        return 1.0;
    }
    1.0 - len_a.abs_diff(len_b) as f64 / longest as f64
}

/// Sorted characters of a query word.
///
/// Every edit fixes at most one unshared character, so the edit distance
/// is at least `max(len) - shared`, where `shared` counts characters the
/// two words have in common (with multiplicity). Built once per query and
/// checked against each key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharBag {
    chars: Vec<char>,
}

impl CharBag {
    pub fn new(word: &str) -> Self {
        let mut chars: Vec<char> = word.chars().collect();
        chars.sort_unstable();
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters shared with `other`, counted with multiplicity.
    pub fn shared_with(&self, other: &CharBag) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < self.chars.len() && j < other.chars.len() {
            match self.chars[i].cmp(&other.chars[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// Best similarity this word could reach against `other`. Never below
    /// the real [`similarity`] and never above [`similarity_upper_bound`].
    pub fn similarity_bound(&self, other: &str) -> f64 {
        let other = CharBag::new(other);
        let longest = self.len().max(other.len());
        if longest == 0 {
            return 1.0;
        }
        // Same arithmetic as `similarity`, so an exact bound rounds identically
        let min_edits = longest - self.shared_with(&other);
        1.0 - min_edits as f64 / longest as f64
    }
}
