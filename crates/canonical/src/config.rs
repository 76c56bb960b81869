//! Configuration types for the clean-token pipeline.
//!
//! [`CanonicalizeConfig`] controls how raw text becomes a [`CleanTokenSet`]
//! (crate::CleanTokenSet). The defaults reproduce the service's HTTP
//! behavior exactly: lowercase every token, keep Unicode as submitted,
//! drop English stopwords.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.lowercase);
//! assert!(!config.normalize_unicode);
//! assert!(config.filter_stopwords);
//! ```
//!
//! ## Keeping stopwords
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig {
//!     filter_stopwords: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the tokenize → normalize → dedup → stopword pipeline.
///
/// Cheap to clone and serde-friendly so it can be embedded in the YAML
/// pipeline config and the server config.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": false,
///   "lowercase": true,
///   "filter_stopwords": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Version of the cleaning behavior.
    ///
    /// Must be >= 1; version 0 is reserved and rejected with
    /// [`CanonicalError::InvalidConfig`].
    pub version: u32,

    /// If true, apply Unicode NFKC normalization to each token before
    /// lowercasing.
    ///
    /// Off by default: the HTTP contract compares keywords against the text
    /// as submitted, and NFKC can change the edit distance between them
    /// (e.g. `"ﬁle"` vs `"file"`).
    pub normalize_unicode: bool,

    /// If true, lowercase every token (locale-free Unicode lowercasing).
    pub lowercase: bool,

    /// If true, remove tokens found in the bundled English stopword list.
    pub filter_stopwords: bool,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: false,
            lowercase: true,
            filter_stopwords: true,
        }
    }
}

impl CanonicalizeConfig {
    /// Reject configurations the pipeline cannot honor.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
