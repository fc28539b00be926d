//! Standard Scaler - per-feature standardization
//!
//! Fit once on the training split; `transform` always reuses the stored
//! training statistics and never refits.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::logic::error::{DetectorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Training mean per feature
    pub mean: Vec<f64>,
    /// Training population std per feature (1.0 for constant columns)
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit mean / population standard deviation per column
    pub fn fit(data: &Array2<f64>) -> Result<Self> {
        if data.nrows() == 0 {
            return Err(DetectorError::InsufficientData { required: 1, got: 0 });
        }
        ensure_finite(data)?;

        let mean = data
            .mean_axis(Axis(0))
            .ok_or(DetectorError::InsufficientData { required: 1, got: 0 })?;
        let std = data.std_axis(Axis(0), 0.0);

        let scale = std
            .iter()
            .zip(mean.iter())
            .map(|(&s, &m)| {
                // Constant column: keep values centred but unscaled
                if s <= 10.0 * f64::EPSILON * m.abs().max(1.0) {
                    1.0
                } else {
                    s
                }
            })
            .collect();

        Ok(Self {
            mean: mean.to_vec(),
            scale,
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize with the training statistics
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        if data.ncols() != self.n_features() {
            return Err(DetectorError::InvalidInput(format!(
                "scaler expects {} features, got {}",
                self.n_features(),
                data.ncols()
            )));
        }
        ensure_finite(data)?;

        let mean = Array1::from(self.mean.clone());
        let scale = Array1::from(self.scale.clone());
        Ok((data - &mean) / &scale)
    }

    /// Structural check for deserialized scalers
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.mean.len() != n_features || self.scale.len() != n_features {
            return Err(format!(
                "scaler width mismatch: expected {}, got mean={} scale={}",
                n_features,
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err("scaler contains a non-positive or non-finite scale".to_string());
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err("scaler contains a non-finite mean".to_string());
        }
        Ok(())
    }
}

pub(crate) fn ensure_finite(data: &Array2<f64>) -> Result<()> {
    if let Some(((row, col), value)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(DetectorError::InvalidInput(format!(
            "non-finite feature at row {}, column {}: {}",
            row, col, value
        )));
    }
    Ok(())
}
