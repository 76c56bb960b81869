use crate::config::CanonicalizeConfig;
use crate::dedup::dedup_by_key;
use crate::document::CleanTokenSet;
use crate::error::CanonicalError;
use crate::normalize::{normalize_token, NormalizedToken, RawToken, TokenValue};
use crate::stopwords::StopwordFilter;
use crate::token::{tokenize, Token};

/// Main entry point. Runs the four cleaning stages over `text` using the
/// built-in English stopword list.
pub fn clean_tokens(text: &str, cfg: &CanonicalizeConfig) -> Result<CleanTokenSet, CanonicalError> {
    clean_tokens_with(text, cfg, StopwordFilter::english())
}

/// Same as [`clean_tokens`] with a caller-supplied stopword filter.
///
/// Each stage consumes the complete output of the previous one.
pub fn clean_tokens_with(
    text: &str,
    cfg: &CanonicalizeConfig,
    stopwords: &StopwordFilter,
) -> Result<CleanTokenSet, CanonicalError> {
    cfg.validate()?;

    let raw: Vec<RawToken> = tokenize(text).into_iter().map(RawToken::from).collect();
    let token_count = raw.len();

    let normalized: Vec<NormalizedToken> =
        raw.iter().map(|token| normalize_token(token, cfg)).collect();

    let unique = dedup_by_key(normalized, |token| &token.value);
    let unique_count = unique.len();

    let kept = if cfg.filter_stopwords {
        stopwords.retain_content(unique, |token| &token.value)
    } else {
        unique
    };

    tracing::debug!(
        tokens = token_count,
        unique = unique_count,
        clean = kept.len(),
        "cleaned text"
    );

    let tokens = kept
        .into_iter()
        .filter_map(|token| match token.value {
            TokenValue::Text(text) => Some(Token {
                text,
                start: token.start,
                end: token.end,
            }),
            TokenValue::NonText => None,
        })
        .collect();

    Ok(CleanTokenSet::new(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_stopwords_after_lowercasing() {
        let cfg = CanonicalizeConfig::default();
        let clean = clean_tokens("The quick brown fox", &cfg).unwrap();
        assert_eq!(clean.joined(), "quick brown fox");
    }

    #[test]
    fn duplicates_collapse_case_insensitively() {
        let cfg = CanonicalizeConfig::default();
        let clean = clean_tokens("Fox fox FOX dog Dog", &cfg).unwrap();
        assert_eq!(clean.joined(), "fox dog");
    }

    #[test]
    fn stopwords_kept_when_disabled() {
        let cfg = CanonicalizeConfig {
            filter_stopwords: false,
            ..Default::default()
        };
        let clean = clean_tokens("The quick brown fox", &cfg).unwrap();
        assert_eq!(clean.joined(), "the quick brown fox");
    }

    #[test]
    fn custom_filter() {
        let cfg = CanonicalizeConfig::default();
        let filter = StopwordFilter::from_list(&["fox"]);
        let clean = clean_tokens_with("The quick brown fox", &cfg, &filter).unwrap();
        assert_eq!(clean.joined(), "the quick brown");
    }

    #[test]
    fn empty_and_stopword_only_text() {
        let cfg = CanonicalizeConfig::default();
        assert!(clean_tokens("", &cfg).unwrap().is_empty());
        assert!(clean_tokens("the and of, is!", &cfg).unwrap().is_empty());
        assert_eq!(clean_tokens("the and of", &cfg).unwrap().joined(), "");
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = CanonicalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            clean_tokens("anything", &cfg),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }
}
