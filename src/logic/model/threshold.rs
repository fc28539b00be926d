//! Threshold Table - clinically normal ranges per vital
//!
//! Hand-authored and immutable. A copy is embedded in every model artifact
//! so tagging stays reproducible independent of retraining.

use serde::{Deserialize, Serialize};

/// Closed normal range for one vital
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalRange {
    pub min: f64,
    pub max: f64,
}

impl VitalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_below(&self, value: f64) -> bool {
        value < self.min
    }

    pub fn is_above(&self, value: f64) -> bool {
        value > self.max
    }
}

/// Normal ranges used by anomaly-type tagging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub heart_rate: VitalRange,
    pub spo2: VitalRange,
    pub temperature: VitalRange,
    pub bp_systolic: VitalRange,
    pub bp_diastolic: VitalRange,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ThresholdTable {
    /// Adult resting reference ranges
    pub const fn standard() -> Self {
        Self {
            heart_rate: VitalRange::new(60.0, 100.0),
            spo2: VitalRange::new(95.0, 100.0),
            temperature: VitalRange::new(97.0, 99.5),
            bp_systolic: VitalRange::new(90.0, 140.0),
            bp_diastolic: VitalRange::new(60.0, 90.0),
        }
    }

    /// Structural check for deserialized tables
    pub fn validate(&self) -> Result<(), String> {
        for (name, range) in [
            ("heart_rate", &self.heart_rate),
            ("spo2", &self.spo2),
            ("temperature", &self.temperature),
            ("bp_systolic", &self.bp_systolic),
            ("bp_diastolic", &self.bp_diastolic),
        ] {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(format!(
                    "invalid threshold for {}: [{}, {}]",
                    name, range.min, range.max
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = ThresholdTable::default();
        assert_eq!(table.heart_rate, VitalRange::new(60.0, 100.0));
        assert_eq!(table.spo2.min, 95.0);
        assert_eq!(table.temperature.max, 99.5);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_range_edges_are_normal() {
        let range = VitalRange::new(95.0, 100.0);
        assert!(!range.is_below(95.0));
        assert!(!range.is_above(100.0));
        assert!(range.is_below(94.9));
        assert!(range.is_above(100.1));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ThresholdTable::standard()).unwrap();
        assert_eq!(json["heart_rate"]["min"], 60.0);
        assert_eq!(json["bp_systolic"]["max"], 140.0);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut table = ThresholdTable::standard();
        table.spo2 = VitalRange::new(100.0, 95.0);
        assert!(table.validate().is_err());
    }
}
