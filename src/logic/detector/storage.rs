use std::fs;
use std::path::Path;

use crate::logic::error::{DetectorError, Result};
use super::artifact::ModelArtifact;
use super::validate::validate_artifact;

/// Save artifact to disk
pub fn save_artifact(artifact: &ModelArtifact, path: &Path) -> Result<()> {
    // Ensure directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_vec_pretty(artifact)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load artifact from disk with validation
pub fn load_artifact(path: &Path) -> Result<ModelArtifact> {
    let data = fs::read(path)?;
    let artifact: ModelArtifact = serde_json::from_slice(&data)
        .map_err(|e| DetectorError::ArtifactCorrupt(e.to_string()))?;

    validate_artifact(&artifact)?;

    Ok(artifact)
}
