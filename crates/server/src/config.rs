use keyscan::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default = "default_true")]
    pub log_json: bool,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Optional YAML pipeline file. Replaces `pipeline` when set.
    #[serde(default)]
    pub pipeline_file: Option<PathBuf>,

    /// Cleaning and matching settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            allowed_origins: Vec::new(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            log_level: default_log_level(),
            log_json: default_true(),
            metrics_enabled: default_true(),
            pipeline_file: None,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    ///
    /// Sources, lowest precedence first: an optional `server.{toml,yaml,json}`
    /// in the working directory, then `KEYSCAN_SERVER__*` variables
    /// (`KEYSCAN_SERVER__PORT=8080`,
    /// `KEYSCAN_SERVER__ALLOWED_ORIGINS=https://a.example,https://b.example`,
    /// `KEYSCAN_SERVER__PIPELINE__MATCHER__MAX_WORKERS=4`).
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(
                config::Environment::with_prefix("KEYSCAN_SERVER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            );

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        if let Some(path) = &config.pipeline_file {
            tracing::info!(path = %path.display(), "loading pipeline config file");
            config.pipeline = PipelineConfig::from_file(path)?;
        }
        config.pipeline.validate()?;

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9999
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 9999);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size_mb, 10);
        assert!(cfg.allowed_origins.is_empty());
        assert!(cfg.log_json);
        assert!(cfg.metrics_enabled);
        assert!(cfg.pipeline_file.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 9999);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_bad_bind_addr() {
        let cfg = ServerConfig {
            bind_addr: "not an address".into(),
            ..ServerConfig::default()
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_sizes_and_timeouts() {
        let cfg = ServerConfig {
            timeout_secs: 5,
            max_body_size_mb: 2,
            ..ServerConfig::default()
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.max_body_size(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let cfg: ServerConfig = serde_json::from_value(serde_json::json!({
            "port": 8081,
            "allowed_origins": ["https://app.example"],
            "pipeline": {"matcher": {"max_workers": 3}}
        }))
        .unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.allowed_origins, vec!["https://app.example".to_string()]);
        assert_eq!(cfg.pipeline.matcher.max_workers, 3);
        assert_eq!(cfg.log_level, "info");
    }
}
