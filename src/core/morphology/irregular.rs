//! Irregular form tables.
//!
//! Consulted before any suffix rule: an irregular hit always wins. Both
//! tables are keyed by base form; the reverse indexes are built lazily.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Irregular plurals as (singular, plural).
pub const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("mouse", "mice"),
    ("man", "men"),
    ("woman", "women"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
];

/// Common strong verbs as (base, principal forms).
pub const IRREGULAR_VERBS: &[(&str, &[&str])] = &[
    ("be", &["am", "is", "are", "was", "were", "been", "being"]),
    ("have", &["has", "had", "having"]),
    ("do", &["does", "did", "done", "doing"]),
    ("go", &["goes", "went", "gone", "going"]),
    ("see", &["saw", "seen"]),
    ("take", &["took", "taken"]),
    ("get", &["got", "gotten"]),
    ("make", &["made"]),
    ("come", &["came"]),
    ("know", &["knew", "known"]),
    ("give", &["gave", "given"]),
    ("find", &["found"]),
    ("think", &["thought"]),
    ("tell", &["told"]),
    ("say", &["said"]),
    ("become", &["became"]),
    ("leave", &["left"]),
    ("feel", &["felt"]),
    ("bring", &["brought"]),
    ("begin", &["began", "begun"]),
    ("keep", &["kept"]),
    ("hold", &["held"]),
    ("write", &["wrote", "written"]),
    ("stand", &["stood"]),
    ("hear", &["heard"]),
    ("run", &["ran"]),
    ("meet", &["met"]),
    ("pay", &["paid"]),
    ("sit", &["sat"]),
    ("speak", &["spoke", "spoken"]),
    ("lead", &["led"]),
    ("grow", &["grew", "grown"]),
    ("lose", &["lost"]),
    ("fall", &["fell", "fallen"]),
    ("send", &["sent"]),
    ("build", &["built"]),
    ("understand", &["understood"]),
    ("draw", &["drew", "drawn"]),
    ("break", &["broke", "broken"]),
    ("spend", &["spent"]),
    ("rise", &["rose", "risen"]),
    ("drive", &["drove", "driven"]),
    ("buy", &["bought"]),
    ("wear", &["wore", "worn"]),
    ("choose", &["chose", "chosen"]),
    ("eat", &["ate", "eaten"]),
    ("teach", &["taught"]),
    ("catch", &["caught"]),
    ("fly", &["flew", "flown"]),
    ("forget", &["forgot", "forgotten"]),
    ("sleep", &["slept"]),
    ("sell", &["sold"]),
    ("win", &["won"]),
    ("sing", &["sang", "sung"]),
    ("swim", &["swam", "swum"]),
    ("drink", &["drank", "drunk"]),
    ("throw", &["threw", "thrown"]),
];

/// Which irregular table a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrregularKind {
    Plural,
    Verb,
}

static FORM_TO_BASE: Lazy<HashMap<&'static str, (&'static str, IrregularKind)>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(base, forms) in IRREGULAR_VERBS {
        for &form in forms {
            map.insert(form, (base, IrregularKind::Verb));
        }
    }
    // Plurals take priority over verb forms
    for &(singular, plural) in IRREGULAR_PLURALS {
        map.insert(plural, (singular, IrregularKind::Plural));
    }
    map
});

static BASE_TO_FORMS: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    for &(singular, plural) in IRREGULAR_PLURALS {
        map.entry(singular).or_default().push(plural);
    }
    for &(base, forms) in IRREGULAR_VERBS {
        map.entry(base).or_default().extend_from_slice(forms);
    }
    map
});

/// Base form for an irregular surface form, if the word is in either table.
pub fn base_of(form: &str) -> Option<(&'static str, IrregularKind)> {
    FORM_TO_BASE.get(form).copied()
}

/// Irregular surface forms of a base word (empty for regular words).
pub fn forms_of(base: &str) -> &'static [&'static str] {
    BASE_TO_FORMS
        .get(base)
        .map(|forms| forms.as_slice())
        .unwrap_or(&[])
}
