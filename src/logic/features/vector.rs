//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses the centralized layout from `layout.rs` for ordering, version
//! tracking and the layout hash stored alongside trained models.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::logic::error::{DetectorError, Result};
use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};
use super::sample::VitalSample;
use super::window::HeartRateWindow;

/// Reference body temperature used by `vitals_composite` (°F)
pub const NORMAL_TEMPERATURE: f64 = 98.6;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn hr_variance(&self) -> f64 {
        self.values[6]
    }

    pub fn bp_ratio(&self) -> f64 {
        self.values[7]
    }

    pub fn vitals_composite(&self) -> f64 {
        self.values[8]
    }

    pub fn validate(&self) -> std::result::Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Convert to JSON for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// DERIVATION
// ============================================================================

/// `bp_systolic / bp_diastolic`
pub fn bp_ratio(sample: &VitalSample) -> Result<f64> {
    if sample.bp_diastolic == 0.0 {
        return Err(DetectorError::DivisionByZero {
            field: "bp_diastolic",
            reading: None,
        });
    }
    Ok(sample.bp_systolic / sample.bp_diastolic)
}

/// Fixed linear combination; a trained model depends on these constants.
pub fn vitals_composite(sample: &VitalSample) -> f64 {
    sample.heart_rate / 100.0
        + (100.0 - sample.spo2) / 10.0
        + (sample.temperature - NORMAL_TEMPERATURE).abs()
}

fn derive_with_variance(sample: &VitalSample, hr_variance: f64) -> Result<FeatureVector> {
    sample.validate()?;
    let [hr, spo2, temp, sys, dia, ecg] = sample.vitals();

    Ok(FeatureVector::from_values([
        hr,
        spo2,
        temp,
        sys,
        dia,
        ecg,
        hr_variance,
        bp_ratio(sample)?,
        vitals_composite(sample),
    ]))
}

/// Derive features for an isolated sample (`hr_variance = 0`)
pub fn derive_one(sample: &VitalSample) -> Result<FeatureVector> {
    derive_with_variance(sample, 0.0)
}

/// Derive features for an ordered batch. `hr_variance` is computed over a
/// window local to this batch. Errors name the offending reading.
pub fn derive_batch(samples: &[VitalSample]) -> Result<Vec<FeatureVector>> {
    let mut window = HeartRateWindow::new();

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            window.push(sample.heart_rate);
            derive_with_variance(sample, window.std_dev()).map_err(|e| e.at_reading(i))
        })
        .collect()
}

/// Stack vectors into an `n x FEATURE_COUNT` matrix
pub fn to_matrix(vectors: &[FeatureVector]) -> Result<Array2<f64>> {
    let mut flat = Vec::with_capacity(vectors.len() * FEATURE_COUNT);
    for vector in vectors {
        vector
            .validate()
            .map_err(|e| DetectorError::InvalidInput(e.to_string()))?;
        flat.extend_from_slice(vector.as_slice());
    }

    Array2::from_shape_vec((vectors.len(), FEATURE_COUNT), flat)
        .map_err(|e| DetectorError::InvalidInput(format!("feature matrix: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hr: f64) -> VitalSample {
        VitalSample::new(hr, 98.0, 98.6, 120.0, 80.0, 0.0)
    }

    #[test]
    fn test_derive_one() {
        let vector = derive_one(&sample(75.0)).unwrap();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.hr_variance(), 0.0);
        assert_eq!(vector.bp_ratio(), 1.5);
        // 0.75 + 0.2 + 0.0
        assert!((vector.vitals_composite() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_zero_diastolic_fails() {
        let mut s = sample(75.0);
        s.bp_diastolic = 0.0;
        assert!(matches!(
            derive_one(&s),
            Err(DetectorError::DivisionByZero {
                field: "bp_diastolic",
                reading: None
            })
        ));
    }

    #[test]
    fn test_composite_uses_absolute_temperature_deviation() {
        let mut cold = sample(100.0);
        cold.temperature = 97.6;
        let mut hot = sample(100.0);
        hot.temperature = 99.6;
        assert!((vitals_composite(&cold) - vitals_composite(&hot)).abs() < 1e-12);
    }

    #[test]
    fn test_to_matrix_shape() {
        let vectors = derive_batch(&[sample(70.0), sample(80.0)]).unwrap();
        let matrix = to_matrix(&vectors).unwrap();
        assert_eq!(matrix.dim(), (2, FEATURE_COUNT));
        assert_eq!(matrix[[1, 0]], 80.0);
    }

    #[test]
    fn test_to_log_entry() {
        let log = derive_one(&sample(75.0)).unwrap().to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["named_values"]["bp_ratio"], 1.5);
    }
}
