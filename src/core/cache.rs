//! Bounded memoization tables for the lookup pipeline.
//!
//! Three independent tables back the resolver:
//!
//! ```text
//!                  LookupCaches
//!                       |
//!     +-----------------+-----------------+
//!     |                 |                 |
//!     v                 v                 v
//!  stems          keywords          similarity
//!  token -> lemma (text, limit)     (a, b) -> score
//!                 -> keywords
//! ```
//!
//! # Eviction
//!
//! Each table is insertion-ordered. When an insert finds the table full,
//! the oldest half is dropped in one pass instead of one entry per insert.
//! Reads never reorder entries, so this is batch FIFO rather than LRU.
//!
//! # Thread Safety
//!
//! Every table sits behind its own `std::sync::RwLock`. A hit takes only the
//! read lock; hit/miss counters are atomics. Inserts, evictions and clears
//! take the write lock of that one table. A poisoned lock is recovered, as
//! the map is valid after any panic in a reader.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Default capacity of each table.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

// ============================================================================
// CacheConfig
// ============================================================================

/// Cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum entries per table. Zero is treated as one.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}

// ============================================================================
// CacheStats
// ============================================================================

/// Snapshot of one table's counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped by batch eviction (not by clears).
    pub evictions: u64,
    pub current_size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups that hit; 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// ============================================================================
// BoundedCache
// ============================================================================

/// A typed, bounded map with batch eviction of the oldest half.
pub struct BoundedCache<K, V> {
    name: &'static str,
    entries: RwLock<IndexMap<K, V>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name,
            entries: RwLock::new(IndexMap::with_capacity(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look up a value, recording a hit or a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();

        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Insert a value, evicting the oldest half first if the table is full.
    ///
    /// Overwriting an existing key never evicts.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let count = (entries.len() / 2).max(1);
            entries.drain(..count);
            self.evictions.fetch_add(count as u64, Ordering::Relaxed);
            log::debug!("{} cache full, evicted {} oldest entries", self.name, count);
        }
        entries.insert(key, value);
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// `compute` runs without any lock held, so two threads missing on the
    /// same key may both compute; the later insert simply overwrites.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            current_size: self.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> std::fmt::Debug for BoundedCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

// ============================================================================
// LookupCaches
// ============================================================================

/// Key of the keyword table: full text plus extraction limit.
pub type KeywordKey = (String, usize);

/// Key of the similarity table, order-normalized.
pub type SimilarityKey = (String, String);

/// Build the similarity key for a pair; `(a, b)` and `(b, a)` share it.
pub fn similarity_key(a: &str, b: &str) -> SimilarityKey {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// The three lookup tables, invalidated together under memory pressure.
#[derive(Debug)]
pub struct LookupCaches {
    pub stems: BoundedCache<String, String>,
    pub keywords: BoundedCache<KeywordKey, Arc<Vec<String>>>,
    pub similarity: BoundedCache<SimilarityKey, f64>,
}

/// Stats of all three tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheReport {
    pub stems: CacheStats,
    pub keywords: CacheStats,
    pub similarity: CacheStats,
}

impl LookupCaches {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            stems: BoundedCache::new("stem", config.capacity),
            keywords: BoundedCache::new("keyword", config.capacity),
            similarity: BoundedCache::new("similarity", config.capacity),
        }
    }

    /// Clear all three tables. Later lookups recompute what they need, so
    /// only speed is affected.
    pub fn reduce_size(&self) {
        let dropped = self.stems.len() + self.keywords.len() + self.similarity.len();
        self.stems.clear();
        self.keywords.clear();
        self.similarity.clear();
        log::info!("Reduced lookup caches, dropped {} entries", dropped);
    }

    pub fn report(&self) -> CacheReport {
        CacheReport {
            stems: self.stems.stats(),
            keywords: self.keywords.stats(),
            similarity: self.similarity.stats(),
        }
    }
}

impl Default for LookupCaches {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
