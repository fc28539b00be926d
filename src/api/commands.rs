//! Commands - request/response layer over the detector
//!
//! Every command returns `Result<T, String>` so callers (the CLI) only deal
//! with a printable error message.

use std::path::Path;

use crate::logic::analysis::{self, BatchAnalysis};
use crate::logic::config::DetectorConfig;
use crate::logic::dataset::{self, DatasetSummary, HealthDataGenerator};
use crate::logic::detector::{HealthAnomalyDetector, ModelInfo, PredictionResult};
use crate::logic::features::VitalSample;
use crate::logic::model::TrainingMetrics;

// ============================================================================
// MODEL LIFECYCLE
// ============================================================================

/// Detector with the artifact at the configured model path installed
pub fn load_detector(config: DetectorConfig) -> Result<HealthAnomalyDetector, String> {
    let detector = HealthAnomalyDetector::new(config);
    detector.load_default().map_err(|e| {
        format!(
            "Failed to load model from {}: {}",
            detector.config().model_path.display(),
            e
        )
    })?;
    Ok(detector)
}

/// Train on a JSONL corpus and save to the configured model path
pub fn train(config: DetectorConfig, data: &Path) -> Result<TrainingMetrics, String> {
    let records = dataset::read_records(data).map_err(|e| e.to_string())?;
    let detector = HealthAnomalyDetector::new(config);
    let metrics = detector.train(&records).map_err(|e| e.to_string())?;
    detector.save_default().map_err(|e| e.to_string())?;
    Ok(metrics)
}

pub fn model_info(detector: &HealthAnomalyDetector) -> Result<ModelInfo, String> {
    detector
        .model_info()
        .ok_or_else(|| "Model not trained".to_string())
}

// ============================================================================
// INFERENCE
// ============================================================================

/// Score one reading given as a JSON object
pub fn predict(detector: &HealthAnomalyDetector, raw: &str) -> Result<PredictionResult, String> {
    let sample = VitalSample::from_json(raw).map_err(|e| e.to_string())?;
    detector.predict_one(&sample).map_err(|e| e.to_string())
}

/// Score an ordered JSON array of readings and summarize
pub fn analyze_batch(detector: &HealthAnomalyDetector, raw: &str) -> Result<BatchAnalysis, String> {
    let samples = VitalSample::batch_from_json(raw).map_err(|e| e.to_string())?;
    let results = detector.predict_many(&samples).map_err(|e| e.to_string())?;
    Ok(analysis::summarize(&results))
}

// ============================================================================
// DATA
// ============================================================================

/// Write a synthetic labelled corpus to `output`
pub fn generate(samples: usize, anomaly_rate: f64, seed: u64, output: &Path) -> Result<DatasetSummary, String> {
    let mut generator = HealthDataGenerator::new(samples, anomaly_rate, seed).map_err(|e| e.to_string())?;
    let records = generator.generate();
    dataset::write_records(output, &records).map_err(|e| e.to_string())?;
    log::info!("Wrote {} records to {}", records.len(), output.display());
    Ok(dataset::summarize(&records))
}
