//! YAML configuration file support for keyscan.
//!
//! Lets deployments describe the cleaning and matching stages in one file
//! and load them at runtime. Every section is optional; missing fields take
//! the library defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "production"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: false
//!   lowercase: true
//!   filter_stopwords: true
//!
//! matcher:
//!   version: "v1"
//!   max_workers: 8
//!   deadline_ms: 2000
//!   max_comparisons: 5000000
//!   chunk_size: 256
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use canonical::CanonicalizeConfig;
use matcher::MatchConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for the clean → match pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Configuration format version
    #[serde(default = "default_format_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Tokenize / normalize / dedup / stopword stage
    #[serde(default)]
    pub canonical: CanonicalizeConfig,

    /// Keyword matching stage
    #[serde(default)]
    pub matcher: MatchConfig,
}

impl PipelineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("canonical: {e}")))?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("matcher: {e}")))?;

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: default_format_version(),
            name: None,
            canonical: CanonicalizeConfig::default(),
            matcher: MatchConfig::default(),
        }
    }
}

fn default_format_version() -> String {
    "1.0".to_string()
}
