//! Morphology Analyzer
//!
//! Maps inflected surface forms to lemmas ("running" -> "run") and lemmas
//! back to their surface forms. Irregular tables are consulted first, then
//! the ordered suffix rules in [`rules`].

pub mod analyzer;
pub mod irregular;
pub mod rules;

pub use analyzer::{lemma_of, stem_candidates, surface_forms_of, MorphologicalCandidate};
pub use irregular::IrregularKind;
pub use rules::{should_double, StripRule, INFLECTION_RULES, MIN_STEM_LEN, STRIP_RULES};
