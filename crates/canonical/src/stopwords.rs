//! Stopword filtering.
//!
//! The bundled list is a fixed set of common English function words. It is
//! built once per process and shared read-only by every request.

use fxhash::FxHashSet;
use once_cell::sync::Lazy;

use crate::normalize::TokenValue;

/// Common English stopwords, lowercase.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "couldn", "couldn't", "d", "did", "didn", "didn't",
    "do", "does", "doesn", "doesn't", "doing", "don", "don't", "down", "during", "each", "few",
    "for", "from", "further", "had", "hadn", "hadn't", "has", "hasn", "hasn't", "have", "haven",
    "haven't", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "i", "if", "in", "into", "is", "isn", "isn't", "it", "it's", "its", "itself", "just", "ll",
    "m", "ma", "me", "mightn", "mightn't", "more", "most", "mustn", "mustn't", "my", "myself",
    "needn", "needn't", "no", "nor", "not", "now", "o", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "re", "s", "same", "shan",
    "shan't", "she", "she's", "should", "should've", "shouldn", "shouldn't", "so", "some",
    "such", "t", "than", "that", "that'll", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "ve", "very", "was", "wasn", "wasn't", "we", "were", "weren", "weren't", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won", "won't",
    "wouldn", "wouldn't", "y", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

static ENGLISH: Lazy<StopwordFilter> = Lazy::new(|| StopwordFilter::from_list(ENGLISH_STOPWORDS));

/// A set-membership filter over lowercase stopwords.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        ENGLISH.clone()
    }
}

impl StopwordFilter {
    /// The shared built-in English filter.
    pub fn english() -> &'static StopwordFilter {
        &ENGLISH
    }

    /// A filter that removes nothing.
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Build a filter from a custom list. Entries are lowercased.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Exact membership test. Callers pass already-normalized tokens.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Keep only textual values that are not stopwords.
    ///
    /// Non-text markers carry nothing to match against and are dropped here
    /// rather than handed to the matcher.
    pub fn retain_content<T, F>(&self, items: Vec<T>, value: F) -> Vec<T>
    where
        F: Fn(&T) -> &TokenValue,
    {
        items
            .into_iter()
            .filter(|item| match value(item) {
                TokenValue::Text(text) => !self.is_stopword(text),
                TokenValue::NonText => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_contains_common_words() {
        let filter = StopwordFilter::english();
        for word in ["the", "is", "and", "it's", "don't"] {
            assert!(filter.is_stopword(word), "{word} should be a stopword");
        }
        assert!(!filter.is_stopword("quick"));
        assert!(!filter.is_stopword("fox"));
    }

    #[test]
    fn membership_is_exact_not_substring() {
        let filter = StopwordFilter::english();
        assert!(!filter.is_stopword("theory"));
        assert!(!filter.is_stopword("th"));
        assert!(!filter.is_stopword("The"));
    }

    #[test]
    fn retain_content_removes_stopwords_and_markers() {
        let filter = StopwordFilter::english();
        let values = vec![
            TokenValue::Text("the".into()),
            TokenValue::Text("fox".into()),
            TokenValue::NonText,
            TokenValue::Text("is".into()),
            TokenValue::Text("quick".into()),
        ];
        let out = filter.retain_content(values, |v| v);
        assert_eq!(
            out,
            vec![
                TokenValue::Text("fox".into()),
                TokenValue::Text("quick".into())
            ]
        );
    }

    #[test]
    fn no_stopword_survives() {
        let filter = StopwordFilter::english();
        let values: Vec<TokenValue> = ENGLISH_STOPWORDS
            .iter()
            .chain(["lantern", "harbor"].iter())
            .map(|w| TokenValue::Text((*w).to_string()))
            .collect();
        let out = filter.retain_content(values, |v| v);
        assert_eq!(out.len(), 2);
        for value in &out {
            assert!(!filter.is_stopword(value.as_text().unwrap()));
        }
    }

    #[test]
    fn custom_list_is_lowercased() {
        let filter = StopwordFilter::from_list(&["Foo", "BAR"]);
        assert!(filter.is_stopword("foo"));
        assert!(filter.is_stopword("bar"));
        assert_eq!(filter.len(), 2);
        assert!(StopwordFilter::empty().is_empty());
    }
}
