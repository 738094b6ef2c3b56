//! Text preprocessing: normalization, tokenization and keyword extraction.

pub mod keywords;
pub mod normalizer;

pub use keywords::{extract_keywords, extract_keywords_with, is_stop_word, MIN_KEYWORD_LEN, STOP_WORDS};
pub use normalizer::{normalize, tokenize, Token, Tokens};
