//! Bulk import feed.
//!
//! A feed is either a JSON array of records or a JSON Lines file (one record
//! per line, `.jsonl` / `.ndjson`). Records are decoded one at a time so a
//! single malformed record is skipped and reported without aborting the
//! load; only a feed whose outer structure is unreadable fails as a whole.
//!
//! The result is a complete, private [`LexiconStore`]; publishing it is the
//! caller's job.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{LexiconError, Result};
use super::models::{Definition, Difficulty, LexiconEntry, PartOfSpeech};
use super::store::LexiconStore;

// ============================================================================
// Wire format
// ============================================================================

/// One record as it appears in the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRecord {
    pub headword: String,
    #[serde(default, alias = "phonetic")]
    pub phonetics: Phonetics,
    pub definitions: Vec<FeedDefinition>,
    pub frequency_rank: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Phonetics may be a single transcription or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Phonetics {
    One(String),
    Many(Vec<String>),
}

impl Default for Phonetics {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<Phonetics> for Vec<String> {
    fn from(phonetics: Phonetics) -> Self {
        match phonetics {
            Phonetics::One(p) => vec![p],
            Phonetics::Many(ps) => ps,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedDefinition {
    pub part_of_speech: PartOfSpeech,
    pub meaning: String,
    #[serde(default)]
    pub secondary_meaning: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl From<FeedDefinition> for Definition {
    fn from(def: FeedDefinition) -> Self {
        let definition = Definition::new(def.part_of_speech, def.meaning)
            .with_examples(def.examples)
            .with_keywords(def.keywords);
        match def.secondary_meaning {
            Some(secondary) => definition.with_secondary(secondary),
            None => definition,
        }
    }
}

impl TryFrom<FeedRecord> for LexiconEntry {
    type Error = LexiconError;

    fn try_from(record: FeedRecord) -> Result<Self> {
        let definitions = record.definitions.into_iter().map(Definition::from).collect();
        Ok(LexiconEntry::new(&record.headword, definitions)?
            .with_phonetics(Vec::<String>::from(record.phonetics))
            .with_frequency_rank(record.frequency_rank)
            .with_difficulty(record.difficulty)
            .with_tags(record.tags))
    }
}

// ============================================================================
// Load report
// ============================================================================

/// A record that was left out of the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Zero-based position in the feed (array index or line number).
    pub index: usize,
    pub reason: String,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Records accepted (duplicates included; the last one wins in the store).
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    fn skip(&mut self, index: usize, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Skipping feed record {}: {}", index, reason);
        self.skipped.push(SkippedRecord { index, reason });
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Feed container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// A single JSON array of records.
    JsonArray,
    /// One JSON record per line; blank lines are ignored.
    JsonLines,
}

impl FeedFormat {
    /// Pick the format from the file extension (`.jsonl`/`.ndjson` are lines).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") => {
                Self::JsonLines
            }
            _ => Self::JsonArray,
        }
    }
}

/// Read and parse a feed file into a fresh store.
pub fn load_feed(path: &Path) -> Result<(LexiconStore, LoadReport)> {
    if !path.exists() {
        return Err(LexiconError::FeedUnavailable(path.to_path_buf()));
    }
    log::info!("Loading lexicon feed from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_feed(&text, FeedFormat::from_path(path))
}

/// Parse feed text into a fresh store.
pub fn parse_feed(text: &str, format: FeedFormat) -> Result<(LexiconStore, LoadReport)> {
    let started = Instant::now();
    let mut report = LoadReport::default();

    let records: Vec<(usize, Value)> = match format {
        FeedFormat::JsonArray => serde_json::from_str::<Vec<Value>>(text)?
            .into_iter()
            .enumerate()
            .collect(),
        FeedFormat::JsonLines => {
            let mut records = Vec::new();
            for (index, line) in text.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Value>(line) {
                    Ok(value) => records.push((index, value)),
                    Err(e) => report.skip(index, format!("invalid JSON: {e}")),
                }
            }
            records
        }
    };

    let mut store = LexiconStore::with_capacity(records.len());
    for (index, value) in records {
        match decode_record(value) {
            Ok(entry) => {
                store.insert(entry);
                report.loaded += 1;
            }
            Err(reason) => report.skip(index, reason),
        }
    }

    report.elapsed = started.elapsed();
    log::info!(
        "Parsed lexicon feed: {} loaded, {} skipped, {} unique headwords in {:?}",
        report.loaded,
        report.skipped_count(),
        store.len(),
        report.elapsed
    );
    Ok((store, report))
}

fn decode_record(value: Value) -> std::result::Result<LexiconEntry, String> {
    let record: FeedRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;
    LexiconEntry::try_from(record).map_err(|e| e.to_string())
}
