//! # keyscan matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` is the last pipeline stage. It takes the [`CleanTokenSet`]
//! produced by `canonical` and a list of keywords, computes the Levenshtein
//! distance between every keyword and every clean token, and reports the
//! keywords that have at least one token within the requested threshold.
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: worker count, optional deadline, optional cap on the
//!   `keywords × tokens` product.
//! - [`MatchRequest`]: keywords in caller order plus the inclusive threshold.
//! - [`KeywordResult`] / [`KeywordMatch`]: per-keyword hits as
//!   `{text, distance}` pairs in clean-token order.
//! - [`Matcher`]: owns a bounded rayon pool shared by all calls.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::{clean_tokens, CanonicalizeConfig};
//! use matcher::{MatchConfig, MatchRequest, Matcher};
//!
//! let clean = clean_tokens("The quick brown fox", &CanonicalizeConfig::default()).unwrap();
//! let matcher = Matcher::new(MatchConfig::default()).unwrap();
//!
//! let req = MatchRequest {
//!     keywords: vec!["quik".into(), "xyz".into()],
//!     max_distance: 1,
//! };
//! let hits = matcher.match_keywords(&clean, &req).unwrap();
//!
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].keyword, "quik");
//! assert_eq!(hits[0].results[0].text, "quick");
//! assert_eq!(hits[0].results[0].distance, 1);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record
//! per-call workload, latency and hit counts.
//!
//! [`CleanTokenSet`]: canonical::CleanTokenSet

pub mod distance;
pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::distance::{edit_distance, within_distance};
pub use crate::engine::{aggregate, Matcher};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{KeywordMatch, KeywordResult, MatchConfig, MatchError, MatchRequest};
