//! Search pipeline configuration

use serde::{Deserialize, Serialize};

/// Configuration for k-NN search and result shaping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default number of results when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Candidate oversampling factor
    ///
    /// The k-NN scan fetches `limit * oversample` candidates because tag/type
    /// filtering and per-document dedup discard some of them. Very selective
    /// filters can still surface fewer than `limit` results; that window is
    /// intentionally bounded.
    #[serde(default = "default_oversample")]
    pub oversample: usize,

    /// Maximum characters of matched content shown per result
    ///
    /// Longer content is cut and suffixed with "...".
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            oversample: default_oversample(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl crate::validation::Validate for SearchConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::validation::validate_positive;

        validate_positive("search.default_limit", self.default_limit, 0)?;
        validate_positive("search.oversample", self.oversample, 0)?;
        validate_positive("search.preview_chars", self.preview_chars, 0)?;
        Ok(())
    }
}

fn default_limit() -> usize {
    5
}

fn default_oversample() -> usize {
    3
}

fn default_preview_chars() -> usize {
    200
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.oversample, 3);
    }

    #[test]
    fn test_zero_oversample_invalid() {
        let config = SearchConfig {
            oversample: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
