use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::config::CanonicalizeConfig;
use crate::token::Token;

/// Input to the normalizer.
///
/// The tokenizer only ever produces [`RawToken::Text`]; `Opaque` exists so
/// callers feeding tokens from elsewhere can pass values that are not text
/// and still get a well-defined result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    Text(Token),
    Opaque,
}

impl From<Token> for RawToken {
    fn from(token: Token) -> Self {
        RawToken::Text(token)
    }
}

/// Output of the normalizer: lowercased text or the non-text marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    NonText,
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            TokenValue::NonText => None,
        }
    }
}

/// A normalized token that remembers where its source word sat in the input.
///
/// `start`/`end` are zero for values that did not come from the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedToken {
    pub value: TokenValue,
    pub start: usize,
    pub end: usize,
}

/// Normalizes a single value.
///
/// Pure and independent of every other token, so callers may apply it in any
/// order or in parallel.
pub fn normalize_token(raw: &RawToken, cfg: &CanonicalizeConfig) -> NormalizedToken {
    match raw {
        RawToken::Text(token) => NormalizedToken {
            value: TokenValue::Text(normalize_text(&token.text, cfg).into_owned()),
            start: token.start,
            end: token.end,
        },
        RawToken::Opaque => NormalizedToken {
            value: TokenValue::NonText,
            start: 0,
            end: 0,
        },
    }
}

/// Applies the configured Unicode and case transforms to a string.
pub fn normalize_text<'a>(text: &'a str, cfg: &CanonicalizeConfig) -> Cow<'a, str> {
    let text: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };

    // Skip the allocation when there is nothing to lowercase.
    if cfg.lowercase && text.chars().any(char::is_uppercase) {
        Cow::Owned(text.to_lowercase())
    } else {
        text
    }
}
