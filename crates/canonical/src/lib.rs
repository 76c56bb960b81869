//! keyscan text cleaning layer.
//!
//! Turns a submitted block of text into the clean token set the matcher
//! compares keywords against.
//!
//! ## What we do
//!
//! 1. Tokenize on Unicode word boundaries (whitespace and punctuation are
//!    delimiters), keeping byte offsets
//! 2. Normalize each token (lowercase, optional NFKC)
//! 3. Drop repeated tokens, keeping first-occurrence order
//! 4. Drop English stopwords
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. The only shared state is
//! the read-only built-in stopword set.
//!
//! Bottom line: same input + same config = same clean token set.

mod config;
mod dedup;
mod document;
mod error;
mod normalize;
mod pipeline;
mod stopwords;
mod token;

pub use crate::config::CanonicalizeConfig;
pub use crate::dedup::{dedup, dedup_by_key};
pub use crate::document::CleanTokenSet;
pub use crate::error::CanonicalError;
pub use crate::normalize::{normalize_text, normalize_token, NormalizedToken, RawToken, TokenValue};
pub use crate::pipeline::{clean_tokens, clean_tokens_with};
pub use crate::stopwords::{StopwordFilter, ENGLISH_STOPWORDS};
pub use crate::token::{tokenize, Token};
