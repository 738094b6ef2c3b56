//! Lexicon engine: the service object callers hold.
//!
//! Owns the published lexicon snapshot, the user-entry overlay, the three
//! lookup caches and the resolver, and exposes every lookup operation.
//! Construct it once at startup and share it as `Arc<LexiconEngine>`.
//!
//! # Publishing
//!
//! ```text
//!  feed file --parse--> private LexiconStore --publish--> RwLock<Arc<LexiconStore>>
//!                                  ^                            |
//!                    custom overlay re-applied          readers clone the Arc
//! ```
//!
//! Readers take the read lock only long enough to clone the `Arc`, then
//! work on an immutable snapshot. A bulk load swaps in a fully built store,
//! so a partial load is never visible.
//!
//! # Caches
//!
//! Every cached value is a pure function of its key (a lemma, a keyword
//! list, a similarity score), so publishing a new store never invalidates
//! them. Only memory pressure ([`LexiconEngine::reduce_cache_size`]) and
//! [`LexiconEngine::reset`] clear them.
//!
//! # Lock order
//!
//! `custom` before `store` before `status`, whenever more than one is held.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use super::cache::{CacheConfig, CacheReport, LookupCaches};
use super::lexicon::{
    self, Definition, LexiconEntry, LexiconError, LexiconStore, LoadReport, Result,
};
use super::morphology;
use super::preprocess::{extract_keywords_with, normalize, tokenize, Token};
use super::resolver::{
    cached_lemma, select_sense, KeywordSource, MatchStage, Resolution, Resolver, ResolverConfig,
    ResolverCounts, SenseChoice, SenseConfig, Suggestion,
};

// ============================================================================
// Configuration
// ============================================================================

/// Everything the engine needs to be constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub resolver: ResolverConfig,
    pub senses: SenseConfig,
    pub cache: CacheConfig,
}

// ============================================================================
// Status and results
// ============================================================================

/// Lifecycle of the published lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexiconStatus {
    /// Nothing loaded yet (or reset).
    Empty,
    /// A bulk load is in progress; the previous snapshot stays readable.
    Loading,
    Ready,
    /// The last bulk load failed; every lookup returns nothing until a load
    /// succeeds or the engine is reset.
    Unavailable,
}

/// A resolved word with its chosen sense.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub entry: Arc<LexiconEntry>,
    pub stage: MatchStage,
    pub similarity: f64,
    /// Index of the chosen definition in `entry.definitions`.
    pub sense_index: usize,
}

impl Lookup {
    pub fn definition(&self) -> Option<&Definition> {
        self.entry.definitions.get(self.sense_index)
    }
}

/// Outcome for one token of a text.
#[derive(Debug, Clone)]
pub struct TokenResolution {
    /// Zero-based token position in the text.
    pub position: usize,
    pub token: Token,
    pub resolution: Option<Resolution>,
}

/// A token in a text that is a form of some headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub position: usize,
    pub token: Token,
}

// ============================================================================
// Cached keyword source
// ============================================================================

/// Keyword extraction and lemmatization memoized in the engine caches.
struct CachedAnalysis<'a> {
    caches: &'a LookupCaches,
}

impl KeywordSource for CachedAnalysis<'_> {
    fn keywords(&self, text: &str, limit: usize) -> Arc<Vec<String>> {
        let caches = self.caches;
        caches
            .keywords
            .get_or_insert_with((text.to_string(), limit), || {
                Arc::new(extract_keywords_with(text, limit, |w| cached_lemma(caches, w)))
            })
    }

    fn lemma(&self, word: &str) -> String {
        cached_lemma(self.caches, word)
    }
}

// ============================================================================
// LexiconEngine
// ============================================================================

/// The lexical resolution service.
pub struct LexiconEngine {
    config: EngineConfig,
    /// User-added entries, re-applied on top of every bulk publish.
    custom: RwLock<IndexMap<String, Arc<LexiconEntry>>>,
    store: RwLock<Arc<LexiconStore>>,
    status: RwLock<LexiconStatus>,
    caches: LookupCaches,
    resolver: Resolver,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl LexiconEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            custom: RwLock::new(IndexMap::new()),
            store: RwLock::new(Arc::new(LexiconStore::new())),
            status: RwLock::new(LexiconStatus::Empty),
            caches: LookupCaches::new(config.cache),
            resolver: Resolver::new(config.resolver),
        }
    }

    /// Engine pre-populated with `store` (status `Ready`).
    pub fn with_store(config: EngineConfig, store: LexiconStore) -> Self {
        let engine = Self::new(config);
        engine.publish(store);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    pub fn status(&self) -> LexiconStatus {
        *read(&self.status)
    }

    /// False once a bulk load has failed, until a later load succeeds or
    /// the engine is reset.
    pub fn is_available(&self) -> bool {
        self.status() != LexiconStatus::Unavailable
    }

    fn set_status(&self, status: LexiconStatus) {
        let mut current = write(&self.status);
        if *current != status {
            log::info!("Lexicon status: {:?} -> {:?}", *current, status);
            *current = status;
        }
    }

    /// Load a feed file and publish it.
    ///
    /// Bad records are skipped and listed in the report. If the feed cannot
    /// be read at all the engine becomes `Unavailable` and the error is
    /// returned.
    pub fn load_feed(&self, path: &Path) -> Result<LoadReport> {
        self.set_status(LexiconStatus::Loading);
        match lexicon::load_feed(path) {
            Ok((store, report)) => {
                self.publish(store);
                Ok(report)
            }
            Err(e) => {
                log::error!("Lexicon load from {} failed: {}", path.display(), e);
                self.set_status(LexiconStatus::Unavailable);
                Err(e)
            }
        }
    }

    /// Run [`load_feed`](Self::load_feed) on the blocking thread pool.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_load(self: Arc<Self>, path: PathBuf) -> JoinHandle<Result<LoadReport>> {
        tokio::task::spawn_blocking(move || self.load_feed(&path))
    }

    /// Atomically replace the lexicon with `store`, re-applying user entries
    /// on top.
    pub fn publish(&self, mut store: LexiconStore) {
        let custom = read(&self.custom);
        for entry in custom.values() {
            store.insert_shared(Arc::clone(entry));
        }
        let len = store.len();
        *write(&self.store) = Arc::new(store);
        drop(custom);

        self.set_status(LexiconStatus::Ready);
        log::info!("Published lexicon with {} entries", len);
    }

    /// Drop every entry (imported and user-added) and clear the caches.
    pub fn reset(&self) {
        let mut custom = write(&self.custom);
        custom.clear();
        *write(&self.store) = Arc::new(LexiconStore::new());
        drop(custom);

        self.caches.reduce_size();
        self.set_status(LexiconStatus::Empty);
    }

    /// Current lexicon snapshot.
    pub fn snapshot(&self) -> Arc<LexiconStore> {
        Arc::clone(&read(&self.store))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ------------------------------------------------------------------------
    // Write path
    // ------------------------------------------------------------------------

    /// Insert or overwrite a user entry.
    ///
    /// The entry shadows any imported entry with the same headword, now and
    /// after later bulk loads. Returns the entry it replaced, if any.
    pub fn add_custom_entry(&self, entry: LexiconEntry) -> Result<Option<Arc<LexiconEntry>>> {
        if !self.is_available() {
            return Err(LexiconError::Unavailable);
        }
        entry.validate()?;

        let entry = Arc::new(entry);
        let mut custom = write(&self.custom);
        custom.insert(entry.headword.clone(), Arc::clone(&entry));

        let mut store = write(&self.store);
        let previous = Arc::make_mut(&mut *store).insert_shared(Arc::clone(&entry));
        drop(store);
        drop(custom);

        log::debug!(
            "{} custom entry '{}'",
            if previous.is_some() { "Replaced" } else { "Added" },
            entry.headword
        );
        Ok(previous)
    }

    /// Append definitions and tags to an existing entry.
    pub fn extend_entry(
        &self,
        headword: &str,
        definitions: Vec<Definition>,
        tags: &[String],
    ) -> Result<Arc<LexiconEntry>> {
        let key = normalize(headword)
            .ok_or_else(|| LexiconError::invalid(format!("headword {headword:?} has no letters")))?;
        let current = self
            .snapshot()
            .get(&key)
            .ok_or_else(|| LexiconError::EntryNotFound(key.to_string()))?;

        let extended = current.extended(definitions, tags)?;
        self.add_custom_entry(extended)?;
        self.snapshot()
            .get(&key)
            .ok_or(LexiconError::EntryNotFound(key.into_inner()))
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    /// Resolve raw input to an entry through the exact/stem/fuzzy cascade.
    pub fn resolve(&self, raw: &str) -> Option<Resolution> {
        if !self.is_available() {
            return None;
        }
        self.resolver.resolve(&self.snapshot(), &self.caches, raw)
    }

    /// Pick the definition of `entry` that best fits `context`.
    pub fn select_sense<'e>(&self, entry: &'e LexiconEntry, context: &str) -> Option<SenseChoice<'e>> {
        select_sense(entry, context, &self.config.senses, &self.analysis())
    }

    /// Resolve `raw` and pick its sense for `context`.
    pub fn lookup(&self, raw: &str, context: &str) -> Option<Lookup> {
        let resolution = self.resolve(raw)?;
        let sense_index = self.select_sense(&resolution.entry, context)?.index;
        Some(Lookup {
            entry: resolution.entry,
            stage: resolution.stage,
            similarity: resolution.similarity,
            sense_index,
        })
    }

    /// Top fuzzy candidates for `raw` ("did you mean").
    pub fn suggest(&self, raw: &str, limit: usize) -> Vec<Suggestion> {
        if !self.is_available() {
            return Vec::new();
        }
        self.resolver.suggest(&self.snapshot(), &self.caches, raw, limit)
    }

    /// Resolve every token of a free text.
    pub fn resolve_text(&self, text: &str) -> Vec<TokenResolution> {
        let available = self.is_available();
        let store = self.snapshot();
        tokenize(text)
            .enumerate()
            .map(|(position, token)| {
                let resolution = available
                    .then(|| self.resolver.resolve_token(&store, &self.caches, &token))
                    .flatten();
                TokenResolution {
                    position,
                    token,
                    resolution,
                }
            })
            .collect()
    }

    /// Tokens of `text` that are forms of `headword`: generated surface
    /// forms, or any token sharing the headword's lemma.
    pub fn find_occurrences(&self, text: &str, headword: &str) -> Vec<Occurrence> {
        let Some(key) = normalize(headword) else {
            return Vec::new();
        };
        let lemma = self.lemma_of(&key);
        let mut forms = morphology::surface_forms_of(&lemma);
        forms.insert(key.into_inner());

        tokenize(text)
            .enumerate()
            .filter(|(_, token)| {
                forms.contains(token.as_str()) || cached_lemma(&self.caches, token) == lemma
            })
            .map(|(position, token)| Occurrence { position, token })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Analysis helpers
    // ------------------------------------------------------------------------

    /// Lemma of a word, memoized.
    pub fn lemma_of(&self, word: &str) -> String {
        cached_lemma(&self.caches, &word.to_lowercase())
    }

    pub fn surface_forms_of(&self, lemma: &str) -> BTreeSet<String> {
        morphology::surface_forms_of(lemma)
    }

    /// Keyword stems of `text`, memoized per `(text, limit)`.
    pub fn extract_keywords(&self, text: &str, limit: usize) -> Arc<Vec<String>> {
        self.analysis().keywords(text, limit)
    }

    fn analysis(&self) -> CachedAnalysis<'_> {
        CachedAnalysis {
            caches: &self.caches,
        }
    }

    // ------------------------------------------------------------------------
    // Instrumentation
    // ------------------------------------------------------------------------

    /// Clear all lookup caches (memory pressure). Results are unaffected.
    pub fn reduce_cache_size(&self) {
        self.caches.reduce_size();
    }

    pub fn cache_stats(&self) -> CacheReport {
        self.caches.report()
    }

    pub fn resolver_counts(&self) -> ResolverCounts {
        self.resolver.counts()
    }
}

impl Default for LexiconEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for LexiconEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconEngine")
            .field("status", &self.status())
            .field("entries", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
