//! Declarative rule tables for the morphology analyzer.
//!
//! Stripping rules (surface form -> stem) live in [`STRIP_RULES`]; their order
//! is part of the contract because it breaks the final tie in lemma
//! selection. Generation rules (lemma -> surface forms) live in
//! [`INFLECTION_RULES`]. Both tables are plain data and are tested on their
//! own, independent of the analyzer that drives them.

/// Minimum length (in characters) of any stem a rule may produce.
pub const MIN_STEM_LEN: usize = 3;

/// Endings after which `-es` is a plural/3rd-person suffix.
pub const SIBILANTS: &[&str] = &["ch", "sh", "s", "x", "z"];

/// Doubled consonants that are never undoubled ("stressed", "falling").
const KEEP_DOUBLED: &[char] = &['f', 'l', 's', 'z'];

// ============================================================================
// Character classes
// ============================================================================

#[inline]
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[inline]
pub fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

/// Whether the final consonant is doubled before an inflectional suffix.
///
/// True exactly when the word has at least three characters, ends in a
/// consonant other than w/x/y, and that consonant follows a vowel which in
/// turn follows a consonant ("run" -> "running", but "read" -> "reading").
pub fn should_double(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    if n < 3 {
        return false;
    }
    let (before, vowel, last) = (chars[n - 3], chars[n - 2], chars[n - 1]);
    is_consonant(last)
        && is_vowel(vowel)
        && is_consonant(before)
        && !matches!(last, 'w' | 'x' | 'y')
}

/// Whether the word ends in a consonant followed by `y` ("city", not "day").
pub fn ends_consonant_y(word: &str) -> bool {
    let mut rev = word.chars().rev();
    matches!((rev.next(), rev.next()), (Some('y'), Some(c)) if is_consonant(c))
}

/// Undo consonant doubling: "runn" -> "run".
///
/// Only applies when the undoubled stem is one the doubling heuristic would
/// double again, and never to f/l/s/z.
pub fn undouble(stem: &str) -> Option<String> {
    let mut rev = stem.chars().rev();
    let (last, prev) = (rev.next()?, rev.next()?);
    if last != prev || !is_consonant(last) || KEEP_DOUBLED.contains(&last) {
        return None;
    }
    let undoubled = &stem[..stem.len() - last.len_utf8()];
    should_double(undoubled).then(|| undoubled.to_string())
}

/// A trailing `e` is only restored after a single consonant, on a remainder
/// that already has a vowel ("mak" -> "make", but not "str" or "runn").
fn restores_e(remainder: &str) -> bool {
    let mut rev = remainder.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(last), prev) => {
            is_consonant(last) && prev != Some(last) && has_vowel(remainder)
        }
        (None, _) => false,
    }
}

fn has_vowel(word: &str) -> bool {
    word.chars().any(|c| is_vowel(c) || c == 'y')
}

/// Whether a produced stem is long enough and pronounceable enough to keep.
pub fn is_viable_stem(stem: &str) -> bool {
    stem.chars().count() >= MIN_STEM_LEN && has_vowel(stem)
}

// ============================================================================
// Stripping rules
// ============================================================================

/// Condition on the part of the word left after removing the suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// The remainder must end with one of these.
    After(&'static [&'static str]),
    /// The remainder must not end with any of these.
    NotAfter(&'static [&'static str]),
}

impl Guard {
    pub fn allows(&self, remainder: &str) -> bool {
        match self {
            Guard::Always => true,
            Guard::After(endings) => endings.iter().any(|e| remainder.ends_with(e)),
            Guard::NotAfter(endings) => !endings.iter().any(|e| remainder.ends_with(e)),
        }
    }
}

/// One suffix-stripping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripRule {
    pub name: &'static str,
    pub suffix: &'static str,
    /// Appended after stripping (`-ies` -> `-y`).
    pub replacement: &'static str,
    pub guard: Guard,
    /// Also try the stem with a restored trailing `e` ("making" -> "make").
    pub restore_e: bool,
    /// Also try undoubling a doubled final consonant ("running" -> "run").
    pub undouble: bool,
}

impl StripRule {
    const fn new(
        name: &'static str,
        suffix: &'static str,
        replacement: &'static str,
        guard: Guard,
    ) -> Self {
        Self {
            name,
            suffix,
            replacement,
            guard,
            restore_e: false,
            undouble: false,
        }
    }

    const fn with_variants(self) -> Self {
        Self {
            restore_e: true,
            undouble: true,
            ..self
        }
    }

    /// Number of characters the suffix consumes; longer wins in selection.
    pub fn consumed(&self) -> usize {
        self.suffix.chars().count()
    }

    /// Apply the rule, returning every viable stem it yields as
    /// `(stem, variant)` pairs. Empty when the rule does not match.
    pub fn apply(&self, word: &str) -> Vec<(String, Variant)> {
        let Some(remainder) = word.strip_suffix(self.suffix) else {
            return Vec::new();
        };
        if remainder.is_empty() || !self.guard.allows(remainder) {
            return Vec::new();
        }

        let mut stems = vec![(format!("{remainder}{}", self.replacement), Variant::Plain)];

        if self.restore_e && restores_e(remainder) {
            stems.push((format!("{remainder}e"), Variant::RestoredE));
        }
        if self.undouble {
            if let Some(stem) = undouble(remainder) {
                stems.push((stem, Variant::Undoubled));
            }
        }

        stems.retain(|(stem, _)| is_viable_stem(stem));
        stems
    }
}

/// How a candidate stem was derived from its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Plain,
    RestoredE,
    Undoubled,
}

const NOT_AFTER_S: &[&str] = &["s", "u", "i"];

/// Ordered stripping rules. Order breaks the final tie in lemma selection.
pub static STRIP_RULES: &[StripRule] = &[
    // Plurals
    StripRule::new("plural-ies", "ies", "y", Guard::Always),
    StripRule::new("plural-es", "es", "", Guard::After(SIBILANTS)),
    StripRule::new("plural-s", "s", "", Guard::NotAfter(NOT_AFTER_S)),
    // Verb forms
    StripRule::new("verb-ing", "ing", "", Guard::Always).with_variants(),
    StripRule::new("verb-ied", "ied", "y", Guard::Always),
    StripRule::new("verb-ed", "ed", "", Guard::NotAfter(&["e"])).with_variants(),
    StripRule::new("verb-s", "s", "", Guard::NotAfter(NOT_AFTER_S)),
    // Adjectives and adverbs
    StripRule::new("adverb-ily", "ily", "y", Guard::Always),
    StripRule::new("adverb-ly", "ly", "", Guard::Always),
    StripRule::new("comparative-ier", "ier", "y", Guard::Always),
    StripRule::new("comparative-er", "er", "", Guard::Always).with_variants(),
    StripRule::new("superlative-iest", "iest", "y", Guard::Always),
    StripRule::new("superlative-est", "est", "", Guard::Always).with_variants(),
];

// ============================================================================
// Inflection (generation) rules
// ============================================================================

/// One generation rule: lemma -> surface forms.
pub type InflectionRule = fn(&str) -> Vec<String>;

/// Ordered generation rules applied by `surface_forms_of`.
pub static INFLECTION_RULES: &[InflectionRule] = &[
    // Nouns
    pluralize,
    // Verbs
    third_person,
    past_tense,
    present_participle,
    // Adjectives
    adverb,
    comparative,
    superlative,
];

fn ends_sibilant(word: &str) -> bool {
    SIBILANTS.iter().any(|s| word.ends_with(s))
}

fn drop_last(word: &str) -> &str {
    let mut chars = word.chars();
    chars.next_back();
    chars.as_str()
}

fn double_last(word: &str) -> String {
    match word.chars().last() {
        Some(last) => format!("{word}{last}"),
        None => String::new(),
    }
}

/// Noun plural: `+s`, `+es` after sibilants, `y`->`ies` after a consonant,
/// `f`/`fe`->`ves` (keeping the plain `+s` form as well).
pub fn pluralize(lemma: &str) -> Vec<String> {
    if ends_sibilant(lemma) {
        vec![format!("{lemma}es")]
    } else if ends_consonant_y(lemma) {
        vec![format!("{}ies", drop_last(lemma))]
    } else if let Some(stem) = lemma.strip_suffix("fe") {
        vec![format!("{stem}ves"), format!("{lemma}s")]
    } else if lemma.ends_with('f') && !lemma.ends_with("ff") {
        vec![format!("{}ves", drop_last(lemma)), format!("{lemma}s")]
    } else {
        vec![format!("{lemma}s")]
    }
}

/// Verb 3rd-person singular.
pub fn third_person(lemma: &str) -> Vec<String> {
    if ends_sibilant(lemma) {
        vec![format!("{lemma}es")]
    } else if ends_consonant_y(lemma) {
        vec![format!("{}ies", drop_last(lemma))]
    } else {
        vec![format!("{lemma}s")]
    }
}

/// Past tense and past participle.
pub fn past_tense(lemma: &str) -> Vec<String> {
    if lemma.ends_with('e') {
        vec![format!("{lemma}d")]
    } else if ends_consonant_y(lemma) {
        vec![format!("{}ied", drop_last(lemma))]
    } else if should_double(lemma) {
        vec![format!("{}ed", double_last(lemma))]
    } else {
        vec![format!("{lemma}ed")]
    }
}

/// Present participle, with `e`-dropping and consonant doubling.
pub fn present_participle(lemma: &str) -> Vec<String> {
    if let Some(stem) = lemma.strip_suffix("ie") {
        vec![format!("{stem}ying")]
    } else if lemma.ends_with('e')
        && lemma.chars().count() >= MIN_STEM_LEN
        && !["ee", "ye", "oe"].iter().any(|e| lemma.ends_with(e))
    {
        vec![format!("{}ing", drop_last(lemma))]
    } else if should_double(lemma) {
        vec![format!("{}ing", double_last(lemma))]
    } else {
        vec![format!("{lemma}ing")]
    }
}

/// Adverb in `-ly`.
pub fn adverb(lemma: &str) -> Vec<String> {
    if ends_consonant_y(lemma) {
        vec![format!("{}ily", drop_last(lemma))]
    } else if lemma.ends_with("le") && lemma.chars().count() > MIN_STEM_LEN {
        vec![format!("{}y", drop_last(lemma))]
    } else {
        vec![format!("{lemma}ly")]
    }
}

/// Comparative in `-er`.
pub fn comparative(lemma: &str) -> Vec<String> {
    graded(lemma, "er")
}

/// Superlative in `-est`.
pub fn superlative(lemma: &str) -> Vec<String> {
    graded(lemma, "est")
}

fn graded(lemma: &str, suffix: &str) -> Vec<String> {
    if lemma.ends_with('e') {
        vec![format!("{lemma}{}", &suffix[1..])]
    } else if ends_consonant_y(lemma) {
        vec![format!("{}i{suffix}", drop_last(lemma))]
    } else if should_double(lemma) {
        vec![format!("{}{suffix}", double_last(lemma))]
    } else {
        vec![format!("{lemma}{suffix}")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("run", true)]
    #[case("stop", true)]
    #[case("big", true)]
    #[case("read", false)] // vowel before the vowel
    #[case("go", false)] // too short
    #[case("fix", false)] // x never doubles
    #[case("show", false)] // w never doubles
    #[case("play", false)] // y never doubles
    #[case("walk", false)] // ends in two consonants
    #[case("see", false)] // ends in a vowel
    #[case("visit", true)] // the heuristic ignores stress
    fn test_should_double(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(should_double(word), expected, "{word}");
    }

    #[rstest]
    #[case("runn", Some("run"))]
    #[case("stopp", Some("stop"))]
    #[case("stress", None)]
    #[case("fall", None)]
    #[case("add", None)] // "ad" is too short to double
    #[case("walk", None)]
    fn test_undouble(#[case] stem: &str, #[case] expected: Option<&str>) {
        assert_eq!(undouble(stem).as_deref(), expected);
    }

    #[test]
    fn test_guard() {
        assert!(Guard::After(SIBILANTS).allows("match"));
        assert!(!Guard::After(SIBILANTS).allows("citi"));
        assert!(!Guard::NotAfter(NOT_AFTER_S).allows("clas"));
        assert!(Guard::NotAfter(NOT_AFTER_S).allows("book"));
        assert!(Guard::Always.allows("anything"));
    }

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<&str> = STRIP_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names[0], "plural-ies");
        assert_eq!(names[3], "verb-ing");
        assert_eq!(*names.last().unwrap(), "superlative-est");
    }

    #[test]
    fn test_ing_rule_variants() {
        let rule = STRIP_RULES.iter().find(|r| r.name == "verb-ing").unwrap();
        let stems: Vec<String> = rule.apply("running").into_iter().map(|(s, _)| s).collect();
        assert_eq!(stems, vec!["runn", "run"]);

        let stems: Vec<(String, Variant)> = rule.apply("making");
        assert_eq!(
            stems,
            vec![
                ("mak".to_string(), Variant::Plain),
                ("make".to_string(), Variant::RestoredE)
            ]
        );
    }

    #[test]
    fn test_rule_rejects_short_stems() {
        let rule = STRIP_RULES.iter().find(|r| r.name == "verb-ing").unwrap();
        assert!(rule.apply("sing").is_empty());
        // "str" has no vowel
        assert!(rule.apply("string").is_empty());

        let rule = STRIP_RULES.iter().find(|r| r.name == "plural-s").unwrap();
        assert!(rule.apply("bus").is_empty());
        assert!(rule.apply("class").is_empty());
        assert_eq!(rule.apply("books")[0].0, "book");
    }

    #[test]
    fn test_es_needs_sibilant() {
        let rule = STRIP_RULES.iter().find(|r| r.name == "plural-es").unwrap();
        assert_eq!(rule.apply("boxes")[0].0, "box");
        assert_eq!(rule.apply("matches")[0].0, "match");
        assert!(rule.apply("cities").is_empty());
    }

    #[test]
    fn test_ed_restores_e_after_consonant_only() {
        let rule = STRIP_RULES.iter().find(|r| r.name == "verb-ed").unwrap();
        let stems: Vec<String> = rule.apply("used").into_iter().map(|(s, _)| s).collect();
        assert_eq!(stems, vec!["use"]);
        // "need" must not become "nee"
        assert!(rule.apply("need").is_empty());
    }

    #[rstest]
    #[case("book", &["books"])]
    #[case("box", &["boxes"])]
    #[case("church", &["churches"])]
    #[case("city", &["cities"])]
    #[case("day", &["days"])]
    #[case("knife", &["knives", "knifes"])]
    #[case("leaf", &["leaves", "leafs"])]
    #[case("cliff", &["cliffs"])]
    fn test_pluralize(#[case] lemma: &str, #[case] expected: &[&str]) {
        assert_eq!(pluralize(lemma), expected);
    }

    #[rstest]
    #[case("run", "running")]
    #[case("read", "reading")]
    #[case("stop", "stopping")]
    #[case("make", "making")]
    #[case("see", "seeing")]
    #[case("die", "dying")]
    #[case("be", "being")]
    fn test_present_participle(#[case] lemma: &str, #[case] expected: &str) {
        assert_eq!(present_participle(lemma), vec![expected.to_string()]);
    }

    #[rstest]
    #[case("walk", "walked")]
    #[case("stop", "stopped")]
    #[case("carry", "carried")]
    #[case("like", "liked")]
    #[case("play", "played")]
    fn test_past_tense(#[case] lemma: &str, #[case] expected: &str) {
        assert_eq!(past_tense(lemma), vec![expected.to_string()]);
    }

    #[rstest]
    #[case("big", "bigger", "biggest", "bigly")]
    #[case("happy", "happier", "happiest", "happily")]
    #[case("large", "larger", "largest", "largely")]
    #[case("gentle", "gentler", "gentlest", "gently")]
    #[case("quick", "quicker", "quickest", "quickly")]
    fn test_graded_forms(
        #[case] lemma: &str,
        #[case] comp: &str,
        #[case] sup: &str,
        #[case] adv: &str,
    ) {
        assert_eq!(comparative(lemma), vec![comp.to_string()]);
        assert_eq!(superlative(lemma), vec![sup.to_string()]);
        assert_eq!(adverb(lemma), vec![adv.to_string()]);
    }
}
