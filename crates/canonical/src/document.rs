//! The clean token set handed to the matcher.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{clean_tokens, CanonicalizeConfig};
//!
//! let cfg = CanonicalizeConfig::default();
//! let clean = clean_tokens("The quick brown fox, the QUICK dog", &cfg).unwrap();
//!
//! assert_eq!(clean.texts().collect::<Vec<_>>(), vec!["quick", "brown", "fox", "dog"]);
//! assert_eq!(clean.joined(), "quick brown fox dog");
//!
//! // Offsets point at the first occurrence in the submitted text.
//! let quick = &clean.tokens()[0];
//! assert_eq!(quick.start, 4);
//! assert_eq!(quick.end, 9);
//! ```

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Tokens that survived tokenize → normalize → dedup → stopword filtering.
///
/// Order follows first occurrence in the input text. Token text is the
/// normalized form; offsets refer to the original submission. The set is
/// read-only once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanTokenSet {
    tokens: Vec<Token>,
}

impl CleanTokenSet {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate token text in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(|t| t.text.as_str())
    }

    /// Tokens joined by single spaces, as reported in `clean_text`.
    pub fn joined(&self) -> String {
        self.texts().collect::<Vec<_>>().join(" ")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> IntoIterator for &'a CleanTokenSet {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
