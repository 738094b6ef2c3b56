//! Morphological analysis: stem candidates, lemma selection and surface
//! form generation.
//!
//! Every strip rule is tried independently against the word and all stems
//! they produce are unioned; selection then picks one deterministically:
//! irregular table, then the longest consumed suffix, then the shortest
//! stem, then rule table order.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use super::irregular::{self, IrregularKind};
use super::rules::{Variant, INFLECTION_RULES, STRIP_RULES};

/// A candidate stem paired with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologicalCandidate {
    pub form: String,
    pub rule: &'static str,
    /// Characters of suffix consumed; zero for irregular lookups.
    pub consumed: usize,
    irregular: bool,
    order: usize,
}

impl MorphologicalCandidate {
    /// Whether this candidate came from an irregular table.
    pub fn is_irregular(&self) -> bool {
        self.irregular
    }

    fn priority(&self) -> (bool, Reverse<usize>, usize, usize) {
        (
            !self.irregular,
            Reverse(self.consumed),
            self.form.chars().count(),
            self.order,
        )
    }
}

/// All candidate stems for `word`, best first, without duplicates.
///
/// `word` is expected to be a normalized token; it is lower-cased here
/// anyway so callers holding raw text get consistent results.
pub fn stem_candidates(word: &str) -> Vec<MorphologicalCandidate> {
    let word = word.to_lowercase();
    let mut candidates = Vec::new();

    if let Some((base, kind)) = irregular::base_of(&word) {
        candidates.push(MorphologicalCandidate {
            form: base.to_string(),
            rule: match kind {
                IrregularKind::Plural => "irregular-plural",
                IrregularKind::Verb => "irregular-verb",
            },
            consumed: 0,
            irregular: true,
            order: 0,
        });
    }

    for (index, rule) in STRIP_RULES.iter().enumerate() {
        for (form, variant) in rule.apply(&word) {
            let variant_rank = match variant {
                Variant::Plain => 0,
                Variant::RestoredE => 1,
                Variant::Undoubled => 2,
            };
            candidates.push(MorphologicalCandidate {
                form,
                rule: rule.name,
                consumed: rule.consumed(),
                irregular: false,
                order: index * 3 + variant_rank,
            });
        }
    }

    candidates.sort_by_key(MorphologicalCandidate::priority);

    let mut seen = HashSet::new();
    candidates.retain(|c| c.form != word && seen.insert(c.form.clone()));
    candidates
}

/// Best single candidate for `word`, or `None` when no rule applies.
fn select(word: &str) -> Option<String> {
    stem_candidates(word).into_iter().next().map(|c| c.form)
}

/// Canonical lemma of a token.
///
/// Selection is repeated until the result no longer changes, so
/// `lemma_of(&lemma_of(w)) == lemma_of(w)` for every input. Words no rule
/// applies to are their own lemma.
pub fn lemma_of(token: &str) -> String {
    let mut path = vec![token.to_lowercase()];
    while let Some(next) = path.last().and_then(|word| select(word)) {
        // Rule stems always shrink, so only irregular hops can close a loop.
        // Every member of a loop maps to its smallest member.
        if let Some(start) = path.iter().position(|word| *word == next) {
            return path.split_off(start).into_iter().min().unwrap_or(next);
        }
        path.push(next);
    }
    path.pop().unwrap_or_default()
}

/// Surface forms generated from `lemma`, including the lemma itself and any
/// irregular forms.
///
/// Rules are applied without knowing the part of speech, so the set is a
/// superset of the forms a speaker would actually use.
pub fn surface_forms_of(lemma: &str) -> BTreeSet<String> {
    let lemma = lemma.to_lowercase();
    let mut forms = BTreeSet::new();
    if lemma.is_empty() {
        return forms;
    }

    forms.extend(irregular::forms_of(&lemma).iter().map(|f| f.to_string()));
    for inflect in INFLECTION_RULES {
        forms.extend(inflect(&lemma));
    }
    forms.insert(lemma);
    forms
}
