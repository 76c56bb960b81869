//! Umbrella crate for keyscan: fuzzy keyword detection over free text.
//!
//! This crate stitches the cleaning stages (`canonical`) and the edit-distance
//! matcher (`matcher`) together so callers can go from raw text and keywords
//! to an [`Analysis`] with a single call.

pub mod config;

pub use crate::config::{ConfigLoadError, PipelineConfig};
pub use canonical::{
    clean_tokens, clean_tokens_with, dedup, normalize_token, tokenize, CanonicalError,
    CanonicalizeConfig, CleanTokenSet, RawToken, StopwordFilter, Token, TokenValue,
};
pub use matcher::{
    edit_distance, set_match_metrics, within_distance, KeywordMatch, KeywordResult, MatchConfig,
    MatchError, MatchMetrics, MatchRequest, Matcher,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running text through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("text cleaning failed: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("keyword matching failed: {0}")]
    Match(#[from] MatchError),
}

/// Result of analyzing one text.
///
/// Serializes to the service's success body:
/// `{"keywords": [...], "clean_text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Keywords with at least one match, in request order.
    pub keywords: Vec<KeywordResult>,
    /// Clean tokens joined by single spaces.
    pub clean_text: String,
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_clean(&self, latency: Duration, result: Result<usize, PipelineError>);
    fn record_match(&self, latency: Duration, result: Result<usize, PipelineError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_clean(self, result: Result<usize, PipelineError>) {
        self.recorder.record_clean(self.start.elapsed(), result);
    }

    fn record_match(self, result: Result<usize, PipelineError>) {
        self.recorder.record_match(self.start.elapsed(), result);
    }
}

/// A configured pipeline: cleaning settings plus a matcher with its worker pool.
///
/// Build one at startup and share it; every call is independent and the only
/// shared state is read-only.
#[derive(Debug, Clone)]
pub struct Pipeline {
    canonical: CanonicalizeConfig,
    matcher: Matcher,
}

impl Pipeline {
    pub fn new(cfg: &PipelineConfig) -> Result<Self, PipelineError> {
        cfg.canonical.validate()?;
        Ok(Self {
            canonical: cfg.canonical.clone(),
            matcher: Matcher::new(cfg.matcher.clone())?,
        })
    }

    pub fn canonical_config(&self) -> &CanonicalizeConfig {
        &self.canonical
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Clean `text` and match `req.keywords` against it.
    ///
    /// Fails fast: any stage error is returned and no partial analysis is
    /// produced.
    pub fn analyze(&self, text: &str, req: &MatchRequest) -> Result<Analysis, PipelineError> {
        let tokens = self.clean(text)?;
        let keywords = self.match_tokens(&tokens, req)?;
        Ok(Analysis {
            keywords,
            clean_text: tokens.joined(),
        })
    }

    fn clean(&self, text: &str) -> Result<CleanTokenSet, PipelineError> {
        let span = MetricsSpan::start();
        let result = clean_tokens(text, &self.canonical).map_err(PipelineError::from);
        if let Some(span) = span {
            span.record_clean(result.as_ref().map(|t| t.len()).map_err(Clone::clone));
        }
        result
    }

    fn match_tokens(
        &self,
        tokens: &CleanTokenSet,
        req: &MatchRequest,
    ) -> Result<Vec<KeywordResult>, PipelineError> {
        let span = MetricsSpan::start();
        let result = self
            .matcher
            .match_keywords(tokens, req)
            .map_err(PipelineError::from);
        if let Some(span) = span {
            span.record_match(result.as_ref().map(Vec::len).map_err(Clone::clone));
        }
        result
    }
}

/// One-shot helper using default configuration.
///
/// Builds a fresh worker pool per call; long-running callers should keep a
/// [`Pipeline`] instead.
pub fn analyze(
    text: &str,
    keywords: &[&str],
    max_distance: usize,
) -> Result<Analysis, PipelineError> {
    let pipeline = Pipeline::new(&PipelineConfig::default())?;
    let req = MatchRequest {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        max_distance,
    };
    pipeline.analyze(text, &req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn analyze_reports_matches_and_clean_text() {
        let analysis = analyze("The quick brown fox", &["quik"], 1).expect("analysis");
        assert_eq!(analysis.clean_text, "quick brown fox");
        assert_eq!(analysis.keywords.len(), 1);
        assert_eq!(analysis.keywords[0].keyword, "quik");
        assert_eq!(analysis.keywords[0].results[0].text, "quick");
        assert_eq!(analysis.keywords[0].results[0].distance, 1);
    }

    #[test]
    fn analysis_serializes_to_response_shape() {
        let analysis = analyze("hello world", &["wrld", "xyz"], 1).expect("analysis");
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "keywords": [
                    {"keyword": "wrld", "results": [{"text": "world", "distance": 1}]}
                ],
                "clean_text": "hello world"
            })
        );
    }

    #[test]
    fn matcher_errors_surface_as_pipeline_errors() {
        let cfg = PipelineConfig {
            matcher: MatchConfig {
                max_comparisons: Some(1),
                ..MatchConfig::default()
            },
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(&cfg).unwrap();
        let req = MatchRequest {
            keywords: vec!["a".into(), "b".into()],
            max_distance: 1,
        };
        let err = pipeline.analyze("alpha beta", &req).unwrap_err();
        assert!(matches!(err, PipelineError::Match(MatchError::TooLarge { .. })));
        assert!(err.to_string().starts_with("keyword matching failed"));
    }

    #[test]
    fn invalid_canonical_config_rejected_up_front() {
        let cfg = PipelineConfig {
            canonical: CanonicalizeConfig {
                version: 0,
                ..Default::default()
            },
            ..PipelineConfig::default()
        };
        assert!(matches!(
            Pipeline::new(&cfg),
            Err(PipelineError::Canonical(CanonicalError::InvalidConfig(_)))
        ));
    }

    #[derive(Default)]
    struct StageRecorder {
        clean: Mutex<Vec<Result<usize, PipelineError>>>,
        matched: Mutex<Vec<Result<usize, PipelineError>>>,
    }

    impl PipelineMetrics for StageRecorder {
        fn record_clean(&self, _latency: Duration, result: Result<usize, PipelineError>) {
            self.clean.lock().unwrap().push(result);
        }

        fn record_match(&self, _latency: Duration, result: Result<usize, PipelineError>) {
            self.matched.lock().unwrap().push(result);
        }
    }

    #[test]
    fn pipeline_metrics_record_each_stage() {
        let recorder = Arc::new(StageRecorder::default());
        set_pipeline_metrics(Some(recorder.clone()));

        let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
        let req = MatchRequest {
            keywords: vec!["zebrafish".into()],
            max_distance: 0,
        };
        pipeline
            .analyze("Zebrafish grazing", &req)
            .unwrap();

        set_pipeline_metrics(None);

        assert!(recorder.clean.lock().unwrap().iter().any(|r| r == &Ok(2)));
        assert!(!recorder.matched.lock().unwrap().is_empty());
    }
}
