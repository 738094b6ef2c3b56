//! Property-based tests for the lexical engine
//!
//! These suites check invariants over generated input rather than fixed
//! cases, using the proptest framework.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `normalizer_props`: canonical token shape
//!   - Output is lower-case and trimmed
//!   - Normalizing twice changes nothing
//!   - Tokenizing is repeatable
//!
//! - `morphology_props`: lemmatization
//!   - `lemma_of` is idempotent
//!   - Candidates never repeat and never echo the input
//!
//! - `cache_props`: bounded caches
//!   - Size never exceeds capacity
//!   - A value just inserted is always readable
//!
//! - `resolution_props`: matching cascade
//!   - Similarity is symmetric and bounded
//!   - Fuzzy matches are always strictly above the threshold
//!   - Resolution is deterministic with warm or cold caches
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod cache_props;
mod morphology_props;
mod normalizer_props;
mod resolution_props;
