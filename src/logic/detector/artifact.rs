//! Persisted model artifact
//!
//! `{checksum, payload}` where `checksum` is the hex SHA-256 of the compact
//! JSON encoding of `payload`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::error::{DetectorError, Result};
use crate::logic::features::layout::layout_hash;
use crate::logic::features::FEATURE_VERSION;
use crate::logic::model::{IsolationForest, StandardScaler, ThresholdTable, TrainingMetrics};
use super::TrainedModel;

/// Bumped on any incompatible change to the payload schema
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPayload {
    pub format_version: u32,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub id: String,
    pub trained_at: DateTime<Utc>,
    pub feature_columns: Vec<String>,
    pub thresholds: ThresholdTable,
    pub contamination: f64,
    pub scaler: StandardScaler,
    pub forest: IsolationForest,
    pub metrics: TrainingMetrics,
}

impl ArtifactPayload {
    pub fn from_model(model: &TrainedModel) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            id: model.id.clone(),
            trained_at: model.trained_at,
            feature_columns: model.feature_columns.clone(),
            thresholds: model.thresholds.clone(),
            contamination: model.contamination,
            scaler: model.scaler.clone(),
            forest: model.forest.clone(),
            metrics: model.metrics.clone(),
        }
    }

    pub fn into_model(self) -> TrainedModel {
        TrainedModel {
            id: self.id,
            trained_at: self.trained_at,
            contamination: self.contamination,
            feature_columns: self.feature_columns,
            thresholds: self.thresholds,
            scaler: self.scaler,
            forest: self.forest,
            metrics: self.metrics,
        }
    }

    pub fn checksum(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub checksum: String,
    pub payload: ArtifactPayload,
}

impl ModelArtifact {
    /// Wrap a payload with its checksum
    pub fn seal(payload: ArtifactPayload) -> Result<Self> {
        Ok(Self {
            checksum: payload.checksum()?,
            payload,
        })
    }

    pub fn verify_checksum(&self) -> Result<()> {
        let actual = self.payload.checksum()?;
        if actual != self.checksum {
            return Err(DetectorError::ArtifactCorrupt(format!(
                "checksum mismatch: stored {}, computed {}",
                self.checksum, actual
            )));
        }
        Ok(())
    }
}
