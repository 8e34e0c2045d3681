//! Configuration for predictors.
//!
//! # Example
//!
//! ```
//! use xorshift_predictor::{PredictorBuilder, PredictorConfig};
//!
//! let config = PredictorConfig {
//!     max_predictions: 20,
//!     ..PredictorConfig::default()
//! };
//! let builder = PredictorBuilder::new().with_config(config);
//! ```

use crate::{PredictorError, PredictorResult, CACHE_SIZE, MAX_PREDICT_NEXT, MIN_SEQUENCE_LENGTH};

/// Tuning knobs shared by both flavors.
///
/// # Forward Compatibility
///
/// New fields may be added to this struct in future versions. To ensure your
/// code continues to compile, always use the `..PredictorConfig::default()`
/// pattern when constructing instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[must_use = "PredictorConfig has no effect unless passed to PredictorBuilder::with_config()"]
pub struct PredictorConfig {
    /// Number of observations the V8 flavor solves over, and the exact length it
    /// requires at construction.
    ///
    /// Default: 4
    pub window_len: usize,

    /// Largest `count` a single V8 `predict_next` call accepts.
    ///
    /// Default: 60
    pub max_predictions: usize,

    /// Replay every recovered anchor against its constraints before using it.
    ///
    /// Default: on in debug builds or with the `paranoid` feature, off otherwise.
    pub verify_anchor: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            window_len: MIN_SEQUENCE_LENGTH,
            max_predictions: MAX_PREDICT_NEXT,
            verify_anchor: cfg!(any(debug_assertions, feature = "paranoid")),
        }
    }
}

impl PredictorConfig {
    /// Creates a new `PredictorConfig` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default limits with anchor verification always on.
    pub fn strict() -> Self {
        Self {
            verify_anchor: true,
            ..Self::default()
        }
    }

    /// Checks that the window and prediction budget fit inside one engine cache.
    pub fn validate(&self) -> PredictorResult<()> {
        if self.window_len == 0 || self.window_len > CACHE_SIZE {
            return Err(PredictorError::InvalidConfig {
                info: format!(
                    "window_len must be between 1 and {}, got {}",
                    CACHE_SIZE, self.window_len
                ),
            });
        }
        if self.window_len.saturating_add(self.max_predictions) > CACHE_SIZE {
            return Err(PredictorError::InvalidConfig {
                info: format!(
                    "window_len + max_predictions must not exceed {}, got {} + {}",
                    CACHE_SIZE, self.window_len, self.max_predictions
                ),
            });
        }
        Ok(())
    }
}
