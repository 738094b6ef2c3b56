//! In-memory lexicon store.
//!
//! An insertion-ordered map from canonical headword to entry. Iteration
//! order is load order, which is what makes fuzzy-match ties deterministic:
//! the first key to reach the top score wins, on every run.
//!
//! Alongside the entries the store keeps a lemma index (lemma of each
//! headword -> position of the first headword with that lemma), so the
//! resolver's stem-equivalence scan is a single lookup instead of a pass
//! over every key.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::models::LexiconEntry;
use crate::core::morphology::lemma_of;

/// Read-optimized headword -> entry map.
///
/// Entries are held behind `Arc` so snapshots of the store (and resolution
/// results) share them without copying.
#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    entries: IndexMap<String, Arc<LexiconEntry>>,
    lemma_index: HashMap<String, usize>,
}

impl LexiconStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            lemma_index: HashMap::with_capacity(capacity),
        }
    }

    /// Look up an entry by headword (case-insensitive).
    pub fn get(&self, headword: &str) -> Option<Arc<LexiconEntry>> {
        self.entries.get(Self::key(headword).as_ref()).cloned()
    }

    pub fn contains(&self, headword: &str) -> bool {
        self.entries.contains_key(Self::key(headword).as_ref())
    }

    /// Insert or overwrite an entry, returning the one it replaced.
    ///
    /// Last write wins. An overwritten key keeps its original position in
    /// iteration order.
    pub fn insert(&mut self, entry: LexiconEntry) -> Option<Arc<LexiconEntry>> {
        self.insert_shared(Arc::new(entry))
    }

    /// Insert an already shared entry.
    pub fn insert_shared(&mut self, entry: Arc<LexiconEntry>) -> Option<Arc<LexiconEntry>> {
        let (position, previous) = self.entries.insert_full(entry.headword.clone(), entry);
        if previous.is_none() {
            if let Some((headword, _)) = self.entries.get_index(position) {
                // Entries are never removed one by one, so the first
                // position recorded for a lemma stays the earliest.
                self.lemma_index.entry(lemma_of(headword)).or_insert(position);
            }
        }
        previous
    }

    /// The first entry, in load order, whose headword has this lemma.
    pub fn first_with_lemma(&self, lemma: &str) -> Option<Arc<LexiconEntry>> {
        let position = *self.lemma_index.get(lemma)?;
        self.entries.get_index(position).map(|(_, entry)| Arc::clone(entry))
    }

    /// All `(headword, entry)` pairs in load order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Arc<LexiconEntry>)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All headwords in load order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.lemma_index.clear();
    }

    fn key(headword: &str) -> Cow<'_, str> {
        if headword.chars().any(char::is_uppercase) {
            Cow::Owned(headword.to_lowercase())
        } else {
            Cow::Borrowed(headword)
        }
    }
}

impl FromIterator<LexiconEntry> for LexiconStore {
    fn from_iter<I: IntoIterator<Item = LexiconEntry>>(iter: I) -> Self {
        let mut store = Self::new();
        for entry in iter {
            store.insert(entry);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::models::{Definition, PartOfSpeech};

    fn entry(headword: &str, meaning: &str) -> LexiconEntry {
        LexiconEntry::new(headword, vec![Definition::new(PartOfSpeech::Noun, meaning)]).unwrap()
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let store: LexiconStore = [entry("Bank", "a financial institution")].into_iter().collect();
        assert!(store.get("bank").is_some());
        assert!(store.get("BANK").is_some());
        assert!(store.get("banks").is_none());
    }

    #[test]
    fn test_insert_last_write_wins() {
        let mut store = LexiconStore::new();
        assert!(store.insert(entry("bank", "imported")).is_none());
        let previous = store.insert(entry("bank", "custom")).unwrap();

        assert_eq!(previous.definitions[0].meaning, "imported");
        assert_eq!(store.get("bank").unwrap().definitions[0].meaning, "custom");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iteration_keeps_load_order() {
        let mut store: LexiconStore = ["cat", "apple", "bank"]
            .into_iter()
            .map(|w| entry(w, "x"))
            .collect();
        store.insert(entry("apple", "overwritten"));

        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, vec!["cat", "apple", "bank"]);
        let (first, _) = store.all().next().unwrap();
        assert_eq!(first, "cat");
    }

    #[test]
    fn test_first_with_lemma_prefers_load_order() {
        let store: LexiconStore = ["walks", "walking", "walk"]
            .into_iter()
            .map(|w| entry(w, "x"))
            .collect();
        assert_eq!(store.first_with_lemma("walk").unwrap().headword, "walks");
        assert!(store.first_with_lemma("run").is_none());
    }

    #[test]
    fn test_clear() {
        let mut store: LexiconStore = [entry("bank", "x")].into_iter().collect();
        store.clear();
        assert!(store.is_empty());
        assert!(store.first_with_lemma("bank").is_none());
    }
}
