//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variables override these at startup via `DetectorConfig::from_env`.

use std::path::PathBuf;

/// Expected fraction of anomalous readings in the population
pub const DEFAULT_CONTAMINATION: f64 = 0.3;

/// Number of isolation trees in the ensemble
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Upper bound on the per-tree sub-sample ("auto" sizing)
pub const DEFAULT_MAX_SAMPLES: usize = 256;

/// Seed shared by the train/test split and the forest
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Held-out fraction used for train-time evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Model artifact file name
pub const MODEL_FILE_NAME: &str = "health_anomaly_model.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name (also the data directory name)
pub const APP_NAME: &str = "vitals-anomaly";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Default model artifact location under the platform data directory
pub fn default_model_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(MODEL_FILE_NAME)
}

/// Get model path from environment or use default
pub fn get_model_path() -> PathBuf {
    std::env::var("VITALS_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_model_path())
}

/// Get contamination prior from environment or use default
pub fn get_contamination() -> f64 {
    std::env::var("VITALS_CONTAMINATION")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CONTAMINATION)
}

/// Get random seed from environment or use default
pub fn get_random_seed() -> u64 {
    std::env::var("VITALS_RANDOM_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RANDOM_SEED)
}
