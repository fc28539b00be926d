use crate::logic::error::{DetectorError, Result};
use crate::logic::features::layout::{feature_columns, validate_layout};
use crate::logic::features::FEATURE_COUNT;
use super::artifact::{ModelArtifact, ARTIFACT_FORMAT_VERSION};

fn corrupt(msg: impl Into<String>) -> DetectorError {
    DetectorError::ArtifactCorrupt(msg.into())
}

/// Validate artifact compatibility and integrity with the current engine
pub fn validate_artifact(artifact: &ModelArtifact) -> Result<()> {
    let payload = &artifact.payload;

    if payload.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(corrupt(format!(
            "unknown format version {} (expected {})",
            payload.format_version, ARTIFACT_FORMAT_VERSION
        )));
    }

    artifact.verify_checksum()?;

    validate_layout(payload.feature_version, payload.layout_hash)
        .map_err(|e| corrupt(e.to_string()))?;

    if payload.feature_columns != feature_columns() {
        return Err(corrupt(format!(
            "feature columns differ from layout: {:?}",
            payload.feature_columns
        )));
    }

    if !(payload.contamination > 0.0 && payload.contamination <= 0.5) {
        return Err(corrupt(format!("contamination out of range: {}", payload.contamination)));
    }

    payload.thresholds.validate().map_err(corrupt)?;
    payload.scaler.validate(FEATURE_COUNT).map_err(corrupt)?;
    payload.forest.validate(FEATURE_COUNT).map_err(corrupt)?;

    Ok(())
}
