// Metrics hooks for the matcher.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`],
// then every `Matcher::match_keywords` call reports its workload size, latency
// and hit count. This keeps instrumentation decoupled from any metrics backend.
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

/// Metrics observer for match operations.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of a match.
    ///
    /// `comparisons` is `keywords × tokens`, `latency` is the wall-clock time
    /// of the call, and `hit_count` is the number of keywords that had at
    /// least one match. Failed calls report `hit_count = 0`.
    fn record_match(&self, comparisons: usize, latency: Duration, hit_count: usize);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// This is typically called once during service startup.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
