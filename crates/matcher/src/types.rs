use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the keyword matcher.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded
/// in the pipeline YAML file and the server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatchConfig {
    /// Configuration schema version.
    pub version: String,
    /// Worker threads in the matcher's pool. `0` means one per available core.
    pub max_workers: usize,
    /// Wall-clock budget for one match call, in milliseconds. `None` disables
    /// the deadline.
    pub deadline_ms: Option<u64>,
    /// Upper bound on `keywords × tokens` for one call. `None` disables the cap.
    pub max_comparisons: Option<usize>,
    /// Tokens handed to one task when fanning out a single keyword.
    pub chunk_size: usize,
}

impl MatchConfig {
    pub(crate) fn default_chunk_size() -> usize {
        256
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version.trim().is_empty() {
            return Err(MatchError::InvalidConfig(
                "config.version must not be empty".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(MatchError::InvalidConfig(
                "chunk_size must be greater than zero".into(),
            ));
        }
        if self.max_comparisons == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_comparisons must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        if self.max_workers > 0 {
            self.max_workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            max_workers: 0,
            deadline_ms: None,
            max_comparisons: None,
            chunk_size: Self::default_chunk_size(),
        }
    }
}

/// A single match request: keywords plus the inclusive distance threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRequest {
    /// Keywords in caller order. Compared exactly as given.
    pub keywords: Vec<String>,
    /// Maximum accepted edit distance (inclusive).
    pub max_distance: usize,
}

/// One clean token that fell within the threshold of a keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordMatch {
    /// The matched token from the clean token set.
    pub text: String,
    /// Edit distance between keyword and token.
    pub distance: usize,
}

/// All matches for one keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordResult {
    pub keyword: String,
    /// Matches in clean-token order.
    pub results: Vec<KeywordMatch>,
}

impl KeywordResult {
    pub fn is_match(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Invalid configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// The configured deadline passed before every comparison finished.
    #[error("match deadline of {deadline_ms}ms exceeded")]
    DeadlineExceeded { deadline_ms: u64 },
    /// The request asks for more comparisons than the configured cap.
    #[error("match request too large: {comparisons} comparisons exceeds limit of {limit}")]
    TooLarge { comparisons: usize, limit: usize },
    /// The worker pool could not be started.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}
