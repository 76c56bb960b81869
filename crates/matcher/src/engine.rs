use std::sync::Arc;
use std::time::{Duration, Instant};

use canonical::CleanTokenSet;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::distance::within_distance;
use crate::metrics::metrics_recorder;
use crate::types::{KeywordMatch, KeywordResult, MatchConfig, MatchError, MatchRequest};


/// Keyword matcher backed by a bounded worker pool.
///
/// The pool is created once and shared by every call, so concurrent
/// requests never spawn more than `MatchConfig::worker_count()` threads
/// between them. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct Matcher {
    cfg: MatchConfig,
    pool: Arc<ThreadPool>,
}

/// Absolute cut-off for one match call.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    expires_at: Option<Instant>,
    budget_ms: u64,
}

impl Deadline {
    fn start(budget_ms: Option<u64>, now: Instant) -> Self {
        Self {
            expires_at: budget_ms.map(|ms| now + Duration::from_millis(ms)),
            budget_ms: budget_ms.unwrap_or_default(),
        }
    }

    fn check(&self) -> Result<(), MatchError> {
        match self.expires_at {
            Some(at) if Instant::now() >= at => Err(MatchError::DeadlineExceeded {
                deadline_ms: self.budget_ms,
            }),
            _ => Ok(()),
        }
    }
}

impl Matcher {
    /// Construct a matcher and its worker pool.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(cfg.worker_count())
            .thread_name(|i| format!("keyscan-match-{i}"))
            .build()
            .map_err(|e| MatchError::WorkerPool(e.to_string()))?;

        tracing::debug!(workers = pool.current_num_threads(), "matcher pool started");

        Ok(Self {
            cfg,
            pool: Arc::new(pool),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Number of threads in the shared pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Match every keyword against the clean tokens and keep only keywords
    /// with at least one hit, in input order.
    pub fn match_keywords(
        &self,
        tokens: &CleanTokenSet,
        req: &MatchRequest,
    ) -> Result<Vec<KeywordResult>, MatchError> {
        let start = Instant::now();
        let comparisons = req.keywords.len().saturating_mul(tokens.len());

        let outcome = self.score_keywords(tokens, req).map(aggregate);
        let latency = start.elapsed();

        match &outcome {
            Ok(hits) => tracing::debug!(
                keywords = req.keywords.len(),
                tokens = tokens.len(),
                hits = hits.len(),
                elapsed_ms = latency.as_millis() as u64,
                "matched keywords"
            ),
            Err(err) => tracing::warn!(
                keywords = req.keywords.len(),
                tokens = tokens.len(),
                error = %err,
                "keyword match failed"
            ),
        }

        if let Some(recorder) = metrics_recorder() {
            let hit_count = outcome.as_ref().map(Vec::len).unwrap_or(0);
            recorder.record_match(comparisons, latency, hit_count);
        }

        outcome
    }

    /// One [`KeywordResult`] per keyword, including keywords without hits.
    ///
    /// Computes the full keywords × tokens product on the worker pool. Keyword
    /// order and clean-token order are preserved regardless of which task
    /// finishes first. Fails without a partial result if the deadline passes.
    pub fn score_keywords(
        &self,
        tokens: &CleanTokenSet,
        req: &MatchRequest,
    ) -> Result<Vec<KeywordResult>, MatchError> {
        let comparisons = req.keywords.len().saturating_mul(tokens.len());
        if let Some(limit) = self.cfg.max_comparisons {
            if comparisons > limit {
                return Err(MatchError::TooLarge { comparisons, limit });
            }
        }

        let deadline = Deadline::start(self.cfg.deadline_ms, Instant::now());
        let texts: Vec<&str> = tokens.texts().collect();

        self.pool.install(|| {
            req.keywords
                .par_iter()
                .map(|keyword| self.match_keyword(keyword, &texts, req.max_distance, &deadline))
                .collect()
        })
    }

    fn match_keyword(
        &self,
        keyword: &str,
        tokens: &[&str],
        max_distance: usize,
        deadline: &Deadline,
    ) -> Result<KeywordResult, MatchError> {
        let chunks: Vec<Vec<KeywordMatch>> = tokens
            .par_chunks(self.cfg.chunk_size)
            .map(|chunk| {
                deadline.check()?;
                Ok(chunk
                    .iter()
                    .filter_map(|token| {
                        within_distance(keyword, token, max_distance).map(|distance| {
                            KeywordMatch {
                                text: (*token).to_string(),
                                distance,
                            }
                        })
                    })
                    .collect())
            })
            .collect::<Result<_, MatchError>>()?;

        Ok(KeywordResult {
            keyword: keyword.to_string(),
            results: chunks.into_iter().flatten().collect(),
        })
    }
}

/// Drop keywords that matched nothing, keeping the order of the rest.
pub fn aggregate(results: Vec<KeywordResult>) -> Vec<KeywordResult> {
    results.into_iter().filter(KeywordResult::is_match).collect()
}
