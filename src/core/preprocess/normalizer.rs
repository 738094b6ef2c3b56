//! Token Normalization
//!
//! Turns raw user input and free-form text into canonical word tokens:
//! 1. Strip surrounding whitespace and punctuation
//! 2. Collapse internal whitespace
//! 3. Lowercase
//! 4. Reject anything without alphabetic content
//! 5. Drop a trailing possessive `'s`
//!
//! All functions are pure; [`tokenize`] is lazy and can be restarted by
//! cloning the iterator or calling it again.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

// ============================================================================
// Token
// ============================================================================

/// A normalized, non-empty, lower-case word.
///
/// Only produced by [`normalize`] and [`tokenize`], so holding a `Token`
/// means the normalization invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(String);

impl Token {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a raw string into a single token.
///
/// Returns `None` for input with no alphabetic content (empty strings,
/// whitespace, bare punctuation, pure numbers).
pub fn normalize(raw: &str) -> Option<Token> {
    let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
    if !trimmed.chars().any(char::is_alphabetic) {
        return None;
    }

    let collapsed = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace('\u{2019}', "'");

    Some(Token(strip_possessive(&collapsed).to_owned()))
}

/// Drop trailing `'s` so "bank's" reaches "bank". Expects the
/// apostrophe already folded to ASCII. Contractions like "don't" are
/// left alone, and so is a suffix with no letters before it ("1's").
fn strip_possessive(mut word: &str) -> &str {
    while let Some(stem) = word.strip_suffix("'s") {
        let stem = stem.trim_end_matches(|c: char| !c.is_alphanumeric());
        if !stem.chars().any(char::is_alphabetic) {
            break;
        }
        word = stem;
    }
    word
}

/// Split free text into tokens.
///
/// Word characters are letters, digits and apostrophes inside a word
/// ("don't" stays whole, the possessive "bank's" yields "bank");
/// everything else is a boundary, and runs of boundaries collapse.
/// Tokens with no letters are skipped.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '\u{2019}'
}

/// Lazy token iterator returned by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let start = self.rest.find(is_word_char)?;
            let tail = &self.rest[start..];
            let end = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
            self.rest = &tail[end..];

            let word = tail[..end].trim_matches(|c: char| c == '\'' || c == '\u{2019}');
            if word.chars().any(char::is_alphabetic) {
                let folded = word.to_lowercase().replace('\u{2019}', "'");
                return Some(Token(strip_possessive(&folded).to_owned()));
            }
        }
    }
}
