//! Prometheus wiring.
//!
//! The recorder is process-global, so it is installed at most once and the
//! handle is shared by every router built afterwards. Installing it also hooks
//! the pipeline and matcher observers into the same registry.

use std::sync::Arc;
use std::time::Duration;

use keyscan::{MatchMetrics, PipelineError, PipelineMetrics};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::error::{ServerError, ServerResult};

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder, or return the one already installed.
pub fn install_prometheus() -> ServerResult<PrometheusHandle> {
    PROMETHEUS
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| ServerError::Config(format!("metrics recorder: {e}")))?;

            let observer = Arc::new(StageMetrics);
            keyscan::set_pipeline_metrics(Some(observer.clone()));
            keyscan::set_match_metrics(Some(observer));

            tracing::info!("prometheus recorder installed");
            Ok(handle)
        })
        .cloned()
}

/// Count one finished `POST /` request.
pub fn record_request(outcome: &'static str, latency: Duration) {
    metrics::counter!("keyscan_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("keyscan_request_duration_seconds").record(latency.as_secs_f64());
}

/// Forwards stage observations to the `metrics` facade.
struct StageMetrics;

impl StageMetrics {
    fn record_stage(stage: &'static str, latency: Duration, failed: bool) {
        metrics::histogram!("keyscan_stage_duration_seconds", "stage" => stage)
            .record(latency.as_secs_f64());
        if failed {
            metrics::counter!("keyscan_stage_errors_total", "stage" => stage).increment(1);
        }
    }
}

impl PipelineMetrics for StageMetrics {
    fn record_clean(&self, latency: Duration, result: Result<usize, PipelineError>) {
        if let Ok(tokens) = &result {
            metrics::histogram!("keyscan_clean_tokens").record(*tokens as f64);
        }
        Self::record_stage("clean", latency, result.is_err());
    }

    fn record_match(&self, latency: Duration, result: Result<usize, PipelineError>) {
        Self::record_stage("match", latency, result.is_err());
    }
}

impl MatchMetrics for StageMetrics {
    fn record_match(&self, comparisons: usize, _latency: Duration, hit_count: usize) {
        metrics::counter!("keyscan_comparisons_total").increment(comparisons as u64);
        metrics::counter!("keyscan_keyword_hits_total").increment(hit_count as u64);
    }
}
