//! Vital Sample - one raw reading from a monitoring band

use serde::{Deserialize, Serialize};

use crate::logic::error::{DetectorError, Result};

/// Raw vital signs. All six measurements are required; a mapping that lacks
/// one fails to deserialize instead of defaulting to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSample {
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub bp_systolic: f64,
    pub bp_diastolic: f64,
    pub ecg: f64,

    // Metadata (ignored by scoring)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_id: Option<String>,
}

impl VitalSample {
    pub fn new(
        heart_rate: f64,
        spo2: f64,
        temperature: f64,
        bp_systolic: f64,
        bp_diastolic: f64,
        ecg: f64,
    ) -> Self {
        Self {
            heart_rate,
            spo2,
            temperature,
            bp_systolic,
            bp_diastolic,
            ecg,
            timestamp: None,
            patient_id: None,
            band_id: None,
        }
    }

    /// Measurements in layout order
    pub fn vitals(&self) -> [f64; 6] {
        [
            self.heart_rate,
            self.spo2,
            self.temperature,
            self.bp_systolic,
            self.bp_diastolic,
            self.ecg,
        ]
    }

    /// Reject NaN / infinite measurements
    pub fn validate(&self) -> Result<()> {
        let names = super::layout::VITAL_FIELDS;
        for (name, value) in names.iter().zip(self.vitals()) {
            if !value.is_finite() {
                return Err(DetectorError::InvalidInput(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Parse one sample from a JSON value
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let sample: VitalSample = serde_json::from_value(value)
            .map_err(|e| DetectorError::InvalidInput(e.to_string()))?;
        sample.validate()?;
        Ok(sample)
    }

    /// Parse one sample from a JSON object string
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| DetectorError::InvalidInput(format!("malformed JSON: {}", e)))?;
        Self::from_json_value(value)
    }

    /// Parse an ordered batch from a JSON array string.
    /// Errors name the offending reading.
    pub fn batch_from_json(raw: &str) -> Result<Vec<Self>> {
        let values: Vec<serde_json::Value> = serde_json::from_str(raw)
            .map_err(|e| DetectorError::InvalidInput(format!("expected a JSON array: {}", e)))?;

        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Self::from_json_value(value).map_err(|e| e.at_reading(i)))
            .collect()
    }
}
