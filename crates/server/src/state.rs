use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use keyscan::Pipeline;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;

/// Comparison cap applied when the pipeline config sets none.
pub const DEFAULT_MAX_COMPARISONS: usize = 10_000_000;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Cleaning + matching pipeline. Owns the matcher's worker pool.
    pub pipeline: Arc<Pipeline>,

    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,

    started_at: Instant,
}

impl ServerState {
    /// Create new server state
    ///
    /// Matching is bounded even when the pipeline config leaves it open: the
    /// deadline defaults to the request timeout and the comparison cap to
    /// [`DEFAULT_MAX_COMPARISONS`]. A timed-out request does not cancel its
    /// blocking task.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let mut pipeline_config = config.pipeline.clone();
        pipeline_config
            .matcher
            .deadline_ms
            .get_or_insert(config.timeout_secs.saturating_mul(1000));
        pipeline_config
            .matcher
            .max_comparisons
            .get_or_insert(DEFAULT_MAX_COMPARISONS);

        let pipeline = Pipeline::new(&pipeline_config)
            .map_err(|e| ServerError::Config(format!("pipeline: {e}")))?;

        let metrics = if config.metrics_enabled {
            Some(crate::telemetry::install_prometheus()?)
        } else {
            None
        };

        tracing::debug!(
            workers = pipeline.matcher().workers(),
            metrics = metrics.is_some(),
            "server state ready"
        );

        Ok(Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            metrics,
            started_at: Instant::now(),
        })
    }

    /// Whole seconds since the state was built.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
