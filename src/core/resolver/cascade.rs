//! Matching cascade: exact, then stem, then fuzzy.
//!
//! Each stage runs only when every earlier stage missed. The resolver owns
//! no data: it reads a store snapshot and the shared lookup caches that the
//! caller passes in, and keeps only configuration and stage counters.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::similarity::{similarity, similarity_upper_bound, CharBag};
use crate::core::cache::{similarity_key, LookupCaches};
use crate::core::lexicon::{LexiconEntry, LexiconStore};
use crate::core::morphology::{lemma_of, stem_candidates};
use crate::core::preprocess::{normalize, Token};

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MIN_FUZZY_LEN: usize = 3;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Resolver tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// A fuzzy match needs a similarity strictly above this.
    pub fuzzy_threshold: f64,
    /// Tokens shorter than this (in characters) skip the fuzzy stage.
    pub min_fuzzy_len: usize,
    /// Default number of "did you mean" suggestions.
    pub suggestion_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            min_fuzzy_len: DEFAULT_MIN_FUZZY_LEN,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Which cascade stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStage {
    Exact,
    Stem,
    Fuzzy,
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Stem => "stem",
            Self::Fuzzy => "fuzzy",
        })
    }
}

/// A matched entry and how it was found.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub entry: Arc<LexiconEntry>,
    pub stage: MatchStage,
    /// 1.0 for exact and stem matches.
    pub similarity: f64,
}

/// A fuzzy candidate offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub headword: String,
    pub similarity: f64,
    pub frequency_rank: u32,
}

// ============================================================================
// Instrumentation
// ============================================================================

/// Snapshot of the resolver counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverCounts {
    pub exact_attempts: u64,
    pub stem_attempts: u64,
    pub fuzzy_attempts: u64,
    /// Similarity scores actually computed (cache misses).
    pub similarity_computations: u64,
}

#[derive(Debug, Default)]
struct ResolverStats {
    exact_attempts: AtomicU64,
    stem_attempts: AtomicU64,
    fuzzy_attempts: AtomicU64,
    similarity_computations: AtomicU64,
}

impl ResolverStats {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ResolverCounts {
        ResolverCounts {
            exact_attempts: self.exact_attempts.load(Ordering::Relaxed),
            stem_attempts: self.stem_attempts.load(Ordering::Relaxed),
            fuzzy_attempts: self.fuzzy_attempts.load(Ordering::Relaxed),
            similarity_computations: self.similarity_computations.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// The three-stage matching cascade.
#[derive(Debug, Default)]
pub struct Resolver {
    config: ResolverConfig,
    stats: ResolverStats,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            stats: ResolverStats::default(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn counts(&self) -> ResolverCounts {
        self.stats.snapshot()
    }

    /// Resolve raw input against `store`.
    ///
    /// Input with no alphabetic content returns `None` before any stage
    /// runs.
    pub fn resolve(&self, store: &LexiconStore, caches: &LookupCaches, raw: &str) -> Option<Resolution> {
        let token = normalize(raw)?;
        self.resolve_token(store, caches, &token)
    }

    /// Resolve an already normalized token.
    pub fn resolve_token(
        &self,
        store: &LexiconStore,
        caches: &LookupCaches,
        token: &Token,
    ) -> Option<Resolution> {
        ResolverStats::bump(&self.stats.exact_attempts);
        if let Some(entry) = store.get(token) {
            return Some(Resolution {
                entry,
                stage: MatchStage::Exact,
                similarity: 1.0,
            });
        }

        ResolverStats::bump(&self.stats.stem_attempts);
        if let Some(entry) = self.stem_match(store, caches, token) {
            return Some(Resolution {
                entry,
                stage: MatchStage::Stem,
                similarity: 1.0,
            });
        }

        if token.char_len() < self.config.min_fuzzy_len {
            return None;
        }
        ResolverStats::bump(&self.stats.fuzzy_attempts);
        self.fuzzy_match(store, caches, token)
            .map(|(entry, similarity)| Resolution {
                entry,
                stage: MatchStage::Fuzzy,
                similarity,
            })
    }

    /// Stem stage.
    ///
    /// 1. The token's lemma as a direct key.
    /// 2. The first key (load order) whose own lemma equals the token's.
    /// 3. The token's remaining stem candidates as direct keys, best first.
    fn stem_match(
        &self,
        store: &LexiconStore,
        caches: &LookupCaches,
        token: &str,
    ) -> Option<Arc<LexiconEntry>> {
        let lemma = cached_lemma(caches, token);
        if let Some(entry) = store.get(&lemma) {
            return Some(entry);
        }
        if let Some(entry) = store.first_with_lemma(&lemma) {
            return Some(entry);
        }
        stem_candidates(token)
            .into_iter()
            .find_map(|candidate| store.get(&candidate.form))
    }

    /// Fuzzy stage: highest similarity strictly above the threshold, first
    /// key in load order on ties.
    fn fuzzy_match(
        &self,
        store: &LexiconStore,
        caches: &LookupCaches,
        token: &Token,
    ) -> Option<(Arc<LexiconEntry>, f64)> {
        let mut best: Option<(&Arc<LexiconEntry>, f64)> = None;
        for (score, entry) in self.fuzzy_candidates(store, caches, token) {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((entry, score));
            }
        }
        best.map(|(entry, score)| (Arc::clone(entry), score))
    }

    /// Top fuzzy candidates above the threshold, by similarity, then
    /// frequency rank, then load order.
    pub fn suggest(
        &self,
        store: &LexiconStore,
        caches: &LookupCaches,
        raw: &str,
        limit: usize,
    ) -> Vec<Suggestion> {
        let Some(token) = normalize(raw) else {
            return Vec::new();
        };
        if limit == 0 || token.char_len() < self.config.min_fuzzy_len {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &Arc<LexiconEntry>)> =
            self.fuzzy_candidates(store, caches, &token).collect();
        // Stable: equal keys keep load order
        scored.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| b.1.frequency_rank.cmp(&a.1.frequency_rank))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(similarity, entry)| Suggestion {
                headword: entry.headword.clone(),
                similarity,
                frequency_rank: entry.frequency_rank,
            })
            .collect()
    }

    /// Every `(score, entry)` above the threshold, in load order.
    ///
    /// Keys that cannot beat the threshold on length or shared characters
    /// are skipped before scoring, so only plausible pairs reach the
    /// similarity cache.
    fn fuzzy_candidates<'s>(
        &'s self,
        store: &'s LexiconStore,
        caches: &'s LookupCaches,
        token: &'s Token,
    ) -> impl Iterator<Item = (f64, &'s Arc<LexiconEntry>)> + 's {
        let threshold = self.config.fuzzy_threshold;
        let token_len = token.char_len();
        let bag = CharBag::new(token);
        store.all().filter_map(move |(key, entry)| {
            if similarity_upper_bound(token_len, key.chars().count()) <= threshold
                || bag.similarity_bound(key) <= threshold
            {
                return None;
            }
            let score = self.cached_similarity(caches, token, key);
            (score > threshold).then_some((score, entry))
        })
    }

    fn cached_similarity(&self, caches: &LookupCaches, a: &str, b: &str) -> f64 {
        caches.similarity.get_or_insert_with(similarity_key(a, b), || {
            ResolverStats::bump(&self.stats.similarity_computations);
            similarity(a, b)
        })
    }
}

/// Lemma of `word`, memoized in the stem cache.
pub fn cached_lemma(caches: &LookupCaches, word: &str) -> String {
    caches
        .stems
        .get_or_insert_with(word.to_string(), || lemma_of(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::CacheConfig;
    use crate::core::lexicon::{Definition, PartOfSpeech};

    fn store(words: &[&str]) -> LexiconStore {
        words
            .iter()
            .map(|w| {
                LexiconEntry::new(w, vec![Definition::new(PartOfSpeech::Noun, format!("meaning of {w}"))])
                    .unwrap()
            })
            .collect()
    }

    fn fixture(words: &[&str]) -> (Resolver, LexiconStore, LookupCaches) {
        (
            Resolver::default(),
            store(words),
            LookupCaches::new(CacheConfig::default()),
        )
    }

    #[test]
    fn test_exact_match() {
        let (resolver, store, caches) = fixture(&["bank", "run"]);
        let hit = resolver.resolve(&store, &caches, "  Bank. ").unwrap();
        assert_eq!(hit.entry.headword, "bank");
        assert_eq!(hit.stage, MatchStage::Exact);
    }

    #[test]
    fn test_stem_match_via_lemma_key() {
        let (resolver, store, caches) = fixture(&["bank", "run"]);
        let hit = resolver.resolve(&store, &caches, "Running").unwrap();
        assert_eq!(hit.entry.headword, "run");
        assert_eq!(hit.stage, MatchStage::Stem);
    }

    #[test]
    fn test_stem_match_via_equivalence() {
        // The token's lemma "walk" is not a key, but "walks" stems to it
        let (resolver, store, caches) = fixture(&["walks"]);
        let hit = resolver.resolve(&store, &caches, "walked").unwrap();
        assert_eq!(hit.entry.headword, "walks");
        assert_eq!(hit.stage, MatchStage::Stem);
    }

    #[test]
    fn test_stem_match_via_other_candidate() {
        // lemma_of("making") is "mak"; the e-restored candidate is a key
        let (resolver, store, caches) = fixture(&["make"]);
        let hit = resolver.resolve(&store, &caches, "making").unwrap();
        assert_eq!(hit.entry.headword, "make");
        assert_eq!(hit.stage, MatchStage::Stem);
    }

    #[test]
    fn test_fuzzy_match() {
        let (resolver, store, caches) = fixture(&["receive", "bank"]);
        let hit = resolver.resolve(&store, &caches, "recieve").unwrap();
        assert_eq!(hit.entry.headword, "receive");
        assert_eq!(hit.stage, MatchStage::Fuzzy);
        assert!((hit.similarity - 6.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_fuzzy_threshold_is_strict() {
        let (resolver, store, caches) = fixture(&["horse"]);
        // similarity("house", "horse") is exactly 0.8
        assert!(resolver.resolve(&store, &caches, "house").is_none());
    }

    #[test]
    fn test_short_tokens_skip_fuzzy() {
        let (resolver, store, caches) = fixture(&["it"]);
        assert!(resolver.resolve(&store, &caches, "is").is_none());
        assert_eq!(resolver.counts().fuzzy_attempts, 0);
    }

    #[test]
    fn test_empty_input_touches_nothing() {
        let (resolver, store, caches) = fixture(&["bank"]);
        assert!(resolver.resolve(&store, &caches, "").is_none());
        assert!(resolver.resolve(&store, &caches, "?!").is_none());
        assert_eq!(resolver.counts(), ResolverCounts::default());
    }

    #[test]
    fn test_exact_hit_never_reaches_fuzzy() {
        let (resolver, store, caches) = fixture(&["bank", "banks", "bark"]);
        for _ in 0..3 {
            resolver.resolve(&store, &caches, "bank").unwrap();
        }
        let counts = resolver.counts();
        assert_eq!(counts.exact_attempts, 3);
        assert_eq!(counts.stem_attempts, 0);
        assert_eq!(counts.fuzzy_attempts, 0);
        assert_eq!(counts.similarity_computations, 0);
    }

    #[test]
    fn test_fuzzy_ties_go_to_load_order() {
        // Both keys are one substitution away from "cantox"
        let (resolver, store, caches) = fixture(&["cantor", "cantos"]);
        let hit = resolver.resolve(&store, &caches, "cantox").unwrap();
        assert_eq!(hit.entry.headword, "cantor");

        let (resolver, store, caches) = fixture(&["cantos", "cantor"]);
        let hit = resolver.resolve(&store, &caches, "cantox").unwrap();
        assert_eq!(hit.entry.headword, "cantos");
    }

    #[test]
    fn test_fuzzy_skips_keys_without_shared_letters() {
        // Same length as the query, so only the shared-letter bound rules them out
        let (resolver, store, caches) = fixture(&["zzzzzzz", "receive", "vieerce", "deceits"]);
        let hit = resolver.resolve(&store, &caches, "recieve").unwrap();
        assert_eq!(hit.entry.headword, "receive");
        // "vieerce" shares every letter and gets scored; "deceits" shares only four
        assert_eq!(resolver.counts().similarity_computations, 2);
        assert_eq!(caches.similarity.len(), 2);
    }

    #[test]
    fn test_warm_similarity_cache_skips_recomputation() {
        let (resolver, store, caches) = fixture(&["receive", "recipe", "relieve", "bank"]);
        resolver.resolve(&store, &caches, "recieve").unwrap();
        let cold = resolver.counts().similarity_computations;
        assert!(cold > 0);

        resolver.resolve(&store, &caches, "recieve").unwrap();
        assert_eq!(resolver.counts().similarity_computations, cold);
    }

    #[test]
    fn test_suggest_orders_by_similarity_then_frequency() {
        let store: LexiconStore = [("relieve", 10), ("receive", 50), ("recite", 90)]
            .into_iter()
            .map(|(w, rank)| {
                LexiconEntry::new(w, vec![Definition::new(PartOfSpeech::Verb, "x")])
                    .unwrap()
                    .with_frequency_rank(rank)
            })
            .collect();
        let caches = LookupCaches::default();
        let resolver = Resolver::default();

        let suggestions = resolver.suggest(&store, &caches, "recieve", 5);
        let words: Vec<&str> = suggestions.iter().map(|s| s.headword.as_str()).collect();
        // receive: 6/7 (one swap); relieve: 6/7 (one substitution); recite: below threshold
        assert_eq!(words, vec!["receive", "relieve"]);
        assert!(resolver.suggest(&store, &caches, "recieve", 0).is_empty());
    }
}
