//! Detector Module - Health Anomaly Detector Facade
//!
//! Owns the trained model and runs the full pipeline per request:
//! features → scaler → isolation forest → triage rules → risk.
//!
//! ## Structure
//! - `artifact`: Persisted `{checksum, payload}` document
//! - `storage`: Save/load to disk
//! - `validate`: Compatibility and integrity checks on load
//!
//! The trained model lives behind `RwLock<Option<Arc<_>>>`. Predictions only
//! hold the read lock long enough to clone the `Arc`; `train`/`load` swap in
//! a whole new snapshot.

pub mod artifact;
pub mod storage;
pub mod validate;


use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ndarray::Axis;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::config::DetectorConfig;
use crate::logic::dataset::LabeledRecord;
use crate::logic::error::{DetectorError, Result};
use crate::logic::features::layout::{feature_columns, layout_hash};
use crate::logic::features::{derive_batch, derive_one, to_matrix, FeatureVector, VitalSample, FEATURE_VERSION};
use crate::logic::model::evaluation::stratified_split;
use crate::logic::model::{
    ConfusionMatrix, ForestParams, IsolationForest, StandardScaler, ThresholdTable, TrainingMetrics,
};
use crate::logic::risk::risk_score;
use crate::logic::triage::{self, AnomalyType, Severity};

pub use artifact::{ArtifactPayload, ModelArtifact, ARTIFACT_FORMAT_VERSION};

/// Fewest labelled records `train` accepts
pub const MIN_TRAINING_RECORDS: usize = 10;

// ============================================================================
// TYPES
// ============================================================================

/// Fitted pipeline. Never mutated once built, only replaced whole.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub id: String,
    pub trained_at: DateTime<Utc>,
    pub contamination: f64,
    pub feature_columns: Vec<String>,
    pub thresholds: ThresholdTable,
    pub scaler: StandardScaler,
    pub forest: IsolationForest,
    pub metrics: TrainingMetrics,
}

/// Per-reading verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub is_anomaly: bool,
    pub anomaly_score: f64,
    pub risk_score: f64,
    pub severity: Severity,
    pub anomaly_types: Vec<AnomalyType>,
    pub recommendations: Vec<String>,
}

/// Metadata of the installed model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub trained_at: DateTime<Utc>,
    pub contamination: f64,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_columns: Vec<String>,
    pub metrics: TrainingMetrics,
}

// ============================================================================
// TRAINED MODEL
// ============================================================================

impl TrainedModel {
    /// Score already-derived feature vectors, one result per sample
    fn score(&self, samples: &[VitalSample], vectors: &[FeatureVector]) -> Result<Vec<PredictionResult>> {
        let matrix = to_matrix(vectors)?;
        let scaled = self.scaler.transform(&matrix)?;
        let outliers = self.forest.predict(&scaled)?;

        let results = samples
            .iter()
            .zip(vectors)
            .zip(outliers)
            .map(|((sample, vector), outlier)| {
                let assessment = triage::assess(sample, &self.thresholds);
                let result = PredictionResult {
                    is_anomaly: outlier.is_anomaly,
                    anomaly_score: outlier.score,
                    risk_score: risk_score(outlier.score, assessment.severity),
                    severity: assessment.severity,
                    anomaly_types: assessment.anomaly_types,
                    recommendations: assessment.recommendations,
                };

                if result.severity == Severity::Critical {
                    log::warn!(
                        "Critical reading: hr={} spo2={} temp={} bp={}/{} risk={:.1}",
                        sample.heart_rate,
                        sample.spo2,
                        sample.temperature,
                        sample.bp_systolic,
                        sample.bp_diastolic,
                        result.risk_score
                    );
                }
                log::debug!(
                    "Prediction: anomaly={} score={:.4} risk={:.1} severity={} features={}",
                    result.is_anomaly,
                    result.anomaly_score,
                    result.risk_score,
                    result.severity,
                    vector.to_log_entry()
                );
                result
            })
            .collect();

        Ok(results)
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            id: self.id.clone(),
            trained_at: self.trained_at,
            contamination: self.contamination,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            feature_columns: self.feature_columns.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

// ============================================================================
// DETECTOR
// ============================================================================

pub struct HealthAnomalyDetector {
    config: DetectorConfig,
    model: RwLock<Option<Arc<TrainedModel>>>,
}

impl HealthAnomalyDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            model: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.model.read().is_some()
    }

    pub fn model_info(&self) -> Option<ModelInfo> {
        self.model.read().as_ref().map(|m| m.info())
    }

    fn snapshot(&self) -> Result<Arc<TrainedModel>> {
        self.model.read().clone().ok_or(DetectorError::ModelNotTrained)
    }

    fn install(&self, model: TrainedModel) {
        *self.model.write() = Some(Arc::new(model));
    }

    /// Fit scaler and forest on a stratified training split, evaluate on the
    /// held-out rows, then install the new model.
    pub fn train(&self, records: &[LabeledRecord]) -> Result<TrainingMetrics> {
        if records.len() < MIN_TRAINING_RECORDS {
            return Err(DetectorError::InsufficientData {
                required: MIN_TRAINING_RECORDS,
                got: records.len(),
            });
        }
        self.config.validate()?;

        log::info!("Training anomaly detection model on {} records...", records.len());

        let samples: Vec<VitalSample> = records.iter().map(LabeledRecord::to_sample).collect();
        for (i, sample) in samples.iter().enumerate() {
            sample.validate().map_err(|e| e.at_reading(i))?;
        }
        let matrix = to_matrix(&derive_batch(&samples)?)?;
        let labels: Vec<bool> = records.iter().map(|r| r.is_anomaly).collect();

        let (train_rows, test_rows) =
            stratified_split(&labels, self.config.test_fraction, self.config.random_seed);

        let train_matrix = matrix.select(Axis(0), &train_rows);
        let scaler = StandardScaler::fit(&train_matrix)?;
        let forest = IsolationForest::fit(
            ForestParams {
                n_estimators: self.config.n_estimators,
                max_samples: self.config.max_samples,
                contamination: self.config.contamination,
                random_seed: self.config.random_seed,
            },
            &scaler.transform(&train_matrix)?,
        )?;

        let confusion = if test_rows.is_empty() {
            ConfusionMatrix::default()
        } else {
            let test_matrix = scaler.transform(&matrix.select(Axis(0), &test_rows))?;
            let predicted: Vec<bool> = forest
                .predict(&test_matrix)?
                .into_iter()
                .map(|o| o.is_anomaly)
                .collect();
            let actual: Vec<bool> = test_rows.iter().map(|&i| labels[i]).collect();
            ConfusionMatrix::from_predictions(&actual, &predicted)
        };
        let metrics = TrainingMetrics::from_confusion(confusion, train_rows.len());

        log::info!(
            "Model performance: accuracy={:.2}% sensitivity={:.2}% specificity={:.2}%",
            metrics.accuracy * 100.0,
            metrics.sensitivity * 100.0,
            metrics.specificity * 100.0
        );
        log::info!(
            "Confusion matrix: TN={} FP={} FN={} TP={}",
            confusion.true_negatives,
            confusion.false_positives,
            confusion.false_negatives,
            confusion.true_positives
        );

        let model = TrainedModel {
            id: Uuid::new_v4().to_string(),
            trained_at: Utc::now(),
            contamination: self.config.contamination,
            feature_columns: feature_columns(),
            thresholds: ThresholdTable::standard(),
            scaler,
            forest,
            metrics: metrics.clone(),
        };
        log::info!("Model {} trained ({} train / {} test)", model.id, metrics.train_size, metrics.test_size);
        self.install(model);

        Ok(metrics)
    }

    /// Score one isolated reading (`hr_variance = 0`)
    pub fn predict_one(&self, sample: &VitalSample) -> Result<PredictionResult> {
        let model = self.snapshot()?;
        sample.validate()?;

        let vector = derive_one(sample)?;
        model
            .score(std::slice::from_ref(sample), std::slice::from_ref(&vector))?
            .pop()
            .ok_or_else(|| DetectorError::InvalidInput("empty prediction".to_string()))
    }

    /// Score an ordered batch; results line up with the input
    pub fn predict_many(&self, samples: &[VitalSample]) -> Result<Vec<PredictionResult>> {
        let model = self.snapshot()?;
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        for (i, sample) in samples.iter().enumerate() {
            sample.validate().map_err(|e| e.at_reading(i))?;
        }

        let vectors = derive_batch(samples)?;
        model.score(samples, &vectors)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let model = self.snapshot()?;
        let artifact = ModelArtifact::seal(ArtifactPayload::from_model(&model))?;
        storage::save_artifact(&artifact, path)?;
        log::info!("Model {} saved to {}", model.id, path.display());
        Ok(())
    }

    /// Replace the installed model with a validated artifact. On failure the
    /// previous model (if any) stays installed.
    pub fn load(&self, path: &Path) -> Result<()> {
        let artifact = storage::load_artifact(path)?;
        let model = artifact.payload.into_model();
        log::info!("Model {} loaded from {} (trained {})", model.id, path.display(), model.trained_at);
        self.install(model);
        Ok(())
    }

    /// Save to the configured model path
    pub fn save_default(&self) -> Result<()> {
        self.save(&self.config.model_path)
    }

    /// Load from the configured model path
    pub fn load_default(&self) -> Result<()> {
        self.load(&self.config.model_path)
    }
}
