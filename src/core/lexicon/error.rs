//! Error types for the lexicon subsystem.
//!
//! Absence is never an error here: a word that matches nothing resolves to
//! `None`, and a malformed feed record is skipped and reported in the
//! [`LoadReport`](super::feed::LoadReport). The variants below cover the few
//! conditions a caller has to act on.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for lexicon operations.
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errors raised by feed loading and the custom-entry write path.
#[derive(Error, Debug)]
pub enum LexiconError {
    // =========================================================================
    // Feed Errors
    // =========================================================================

    /// The feed file could not be opened or read.
    #[error("Feed I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The feed is not a JSON array (or a JSON Lines stream) at all.
    ///
    /// Individual bad records never produce this; only a feed whose outer
    /// structure cannot be parsed does.
    #[error("Feed is not valid JSON: {0}")]
    FeedSyntax(#[from] serde_json::Error),

    /// No feed exists at the configured location.
    #[error("Lexicon feed not found: {}", .0.display())]
    FeedUnavailable(PathBuf),

    // =========================================================================
    // Write-path Errors
    // =========================================================================

    /// A custom entry violates the entry invariants.
    #[error("Invalid entry: {reason}")]
    InvalidEntry {
        /// Why the entry was rejected
        reason: String,
    },

    /// Tried to extend an entry that is not in the lexicon.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    // =========================================================================
    // Engine State
    // =========================================================================

    /// The engine has no usable lexicon (a previous bulk load failed).
    #[error("Lexicon unavailable")]
    Unavailable,
}

impl LexiconError {
    /// Shorthand for [`LexiconError::InvalidEntry`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            reason: reason.into(),
        }
    }
}
