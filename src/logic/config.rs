//! Detector Configuration
//!
//! Everything the facade needs is passed in explicitly; there are no
//! process-wide path constants.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;
use super::error::{DetectorError, Result};

/// Configuration for `HealthAnomalyDetector`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Where the CLI reads/writes the model artifact
    pub model_path: PathBuf,

    /// Expected anomaly proportion, in (0, 0.5]
    pub contamination: f64,

    /// Ensemble size
    pub n_estimators: usize,

    /// Cap on the per-tree sub-sample
    pub max_samples: usize,

    /// Seed for the split and the forest
    pub random_seed: u64,

    /// Held-out fraction for evaluation
    pub test_fraction: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: constants::default_model_path(),
            contamination: constants::DEFAULT_CONTAMINATION,
            n_estimators: constants::DEFAULT_N_ESTIMATORS,
            max_samples: constants::DEFAULT_MAX_SAMPLES,
            random_seed: constants::DEFAULT_RANDOM_SEED,
            test_fraction: constants::DEFAULT_TEST_FRACTION,
        }
    }
}

impl DetectorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: constants::get_model_path(),
            contamination: constants::get_contamination(),
            random_seed: constants::get_random_seed(),
            ..Default::default()
        }
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_contamination(mut self, contamination: f64) -> Self {
        self.contamination = contamination;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(DetectorError::invalid_parameter(
                "contamination",
                format!("must be in (0, 0.5], got {}", self.contamination),
            ));
        }
        if self.n_estimators == 0 {
            return Err(DetectorError::invalid_parameter("n_estimators", "must be at least 1"));
        }
        if self.max_samples < 2 {
            return Err(DetectorError::invalid_parameter("max_samples", "must be at least 2"));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(DetectorError::invalid_parameter(
                "test_fraction",
                format!("must be in (0, 1), got {}", self.test_fraction),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DetectorConfig::default();
        assert_eq!(config.contamination, 0.3);
        assert_eq!(config.n_estimators, 100);
        assert_eq!(config.random_seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reject_contamination_out_of_range() {
        assert!(DetectorConfig::default().with_contamination(0.0).validate().is_err());
        assert!(DetectorConfig::default().with_contamination(0.6).validate().is_err());
        assert!(DetectorConfig::default().with_contamination(0.5).validate().is_ok());
    }

    #[test]
    fn test_reject_zero_estimators() {
        let config = DetectorConfig {
            n_estimators: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DetectorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_model_path_override() {
        let config = DetectorConfig::default().with_model_path("/tmp/model.json");
        assert_eq!(config.model_path, PathBuf::from("/tmp/model.json"));
    }
}
