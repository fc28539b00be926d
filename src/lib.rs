//! Vital-sign anomaly detection core
//!
//! Feature derivation, an isolation-forest outlier model, a threshold rule
//! engine and a risk scorer behind one detector facade.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::config::DetectorConfig;
pub use logic::detector::{HealthAnomalyDetector, ModelInfo, PredictionResult};
pub use logic::error::{DetectorError, Result};
pub use logic::features::VitalSample;
pub use logic::triage::{AnomalyType, Severity};
