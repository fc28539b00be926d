//! Triage Classifier
//!
//! Deterministic threshold logic only. Input: raw vitals and the normal-range
//! table. Output: `RuleAssessment`. Never consults the outlier model.

use crate::logic::features::VitalSample;
use crate::logic::model::ThresholdTable;
use super::rules::*;
use super::types::{AnomalyType, PointBreakdown, RuleAssessment, Severity};

// ============================================================================
// SEVERITY POINTS
// ============================================================================

pub fn heart_rate_points(heart_rate: f64) -> u8 {
    let deviation = (heart_rate - REFERENCE_HEART_RATE).abs() / REFERENCE_HEART_RATE;
    if deviation > HR_DEVIATION_MAJOR {
        2
    } else if deviation > HR_DEVIATION_MINOR {
        1
    } else {
        0
    }
}

pub fn spo2_points(spo2: f64) -> u8 {
    if spo2 < SPO2_SEVERE {
        3
    } else if spo2 < SPO2_LOW {
        1
    } else {
        0
    }
}

pub fn temperature_points(temperature: f64) -> u8 {
    if temperature > TEMP_HIGH_FEVER {
        2
    } else if temperature > TEMP_FEVER {
        1
    } else {
        0
    }
}

/// First matching band wins, checked high to low
pub fn blood_pressure_points(systolic: f64, diastolic: f64) -> u8 {
    if systolic > BP_SYSTOLIC_HIGH || diastolic > BP_DIASTOLIC_HIGH {
        2
    } else if systolic > BP_SYSTOLIC_ELEVATED || diastolic > BP_DIASTOLIC_ELEVATED {
        1
    } else {
        0
    }
}

pub fn severity_points(sample: &VitalSample) -> PointBreakdown {
    PointBreakdown {
        heart_rate: heart_rate_points(sample.heart_rate),
        spo2: spo2_points(sample.spo2),
        temperature: temperature_points(sample.temperature),
        blood_pressure: blood_pressure_points(sample.bp_systolic, sample.bp_diastolic),
    }
}

/// Map a point total to a tier. A zero total is `Normal` only when no
/// anomaly type fired; otherwise `Low`.
pub fn severity_tier(points: u8, has_findings: bool) -> Severity {
    if points >= CRITICAL_MIN_POINTS {
        Severity::Critical
    } else if points >= HIGH_MIN_POINTS {
        Severity::High
    } else if points >= MEDIUM_MIN_POINTS {
        Severity::Medium
    } else if has_findings {
        Severity::Low
    } else {
        Severity::Normal
    }
}

// ============================================================================
// ANOMALY TYPES
// ============================================================================

/// Tags in fixed order; `[None]` when nothing fires
pub fn identify_anomaly_types(sample: &VitalSample, table: &ThresholdTable) -> Vec<AnomalyType> {
    let mut types = Vec::new();

    if table.heart_rate.is_below(sample.heart_rate) {
        types.push(AnomalyType::Bradycardia);
    } else if table.heart_rate.is_above(sample.heart_rate) {
        types.push(AnomalyType::Tachycardia);
    }

    if table.spo2.is_below(sample.spo2) {
        types.push(AnomalyType::Hypoxia);
    }

    if table.temperature.is_above(sample.temperature) {
        types.push(AnomalyType::Fever);
    }

    if table.bp_systolic.is_above(sample.bp_systolic) {
        types.push(AnomalyType::Hypertension);
    } else if table.bp_systolic.is_below(sample.bp_systolic) {
        types.push(AnomalyType::Hypotension);
    }

    if types.is_empty() {
        types.push(AnomalyType::None);
    }
    types
}

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

pub fn recommendations(types: &[AnomalyType], severity: Severity) -> Vec<String> {
    let mut advice: Vec<String> = types
        .iter()
        .filter_map(|t| t.recommendation())
        .map(str::to_string)
        .collect();

    if severity.requires_immediate_attention() {
        advice.insert(0, IMMEDIATE_ATTENTION.to_string());
    }

    if advice.is_empty() {
        advice.push(ROUTINE_MONITORING.to_string());
    }
    advice
}

// ============================================================================
// MAIN ASSESSMENT FUNCTION
// ============================================================================

/// Full rule-based triage for one sample
pub fn assess(sample: &VitalSample, table: &ThresholdTable) -> RuleAssessment {
    let mut assessment = RuleAssessment {
        points: severity_points(sample),
        severity: Severity::Normal,
        anomaly_types: identify_anomaly_types(sample, table),
        recommendations: Vec::new(),
    };
    assessment.severity = severity_tier(assessment.points.total(), assessment.has_findings());
    assessment.recommendations = recommendations(&assessment.anomaly_types, assessment.severity);
    assessment
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn normal() -> VitalSample {
        VitalSample::new(75.0, 98.0, 98.6, 120.0, 80.0, 0.0)
    }

    #[test]
    fn test_normal_reading() {
        let result = assess(&normal(), &ThresholdTable::standard());
        assert_eq!(result.points.total(), 0);
        assert_eq!(result.severity, Severity::Normal);
        assert_eq!(result.anomaly_types, vec![AnomalyType::None]);
        assert_eq!(result.recommendations, vec![ROUTINE_MONITORING.to_string()]);
        assert!(!result.has_findings());
    }

    #[test]
    fn test_multi_system_crisis() {
        let sample = VitalSample::new(45.0, 89.0, 101.5, 160.0, 95.0, 25.0);
        let result = assess(&sample, &ThresholdTable::standard());

        assert_eq!(result.points.total(), 9);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(
            result.anomaly_types,
            vec![
                AnomalyType::Bradycardia,
                AnomalyType::Hypoxia,
                AnomalyType::Fever,
                AnomalyType::Hypertension,
            ]
        );
        assert_eq!(result.recommendations[0], IMMEDIATE_ATTENTION);
        assert_eq!(result.recommendations.len(), 5);
    }

    #[test]
    fn test_spo2_boundary() {
        let table = ThresholdTable::standard();
        let mut sample = normal();

        sample.spo2 = 94.9;
        assert!(identify_anomaly_types(&sample, &table).contains(&AnomalyType::Hypoxia));

        sample.spo2 = 95.0;
        assert!(!identify_anomaly_types(&sample, &table).contains(&AnomalyType::Hypoxia));
    }

    #[test]
    fn test_heart_rate_bands() {
        assert_eq!(heart_rate_points(75.0), 0);
        assert_eq!(heart_rate_points(90.0), 0); // exactly 0.2
        assert_eq!(heart_rate_points(91.0), 1);
        assert_eq!(heart_rate_points(97.5), 1); // exactly 0.3
        assert_eq!(heart_rate_points(98.0), 2);
        assert_eq!(heart_rate_points(52.0), 2);
    }

    #[test]
    fn test_blood_pressure_first_band_wins() {
        assert_eq!(blood_pressure_points(120.0, 80.0), 0);
        assert_eq!(blood_pressure_points(135.0, 80.0), 1);
        assert_eq!(blood_pressure_points(120.0, 88.0), 1);
        assert_eq!(blood_pressure_points(120.0, 95.0), 2);
        assert_eq!(blood_pressure_points(150.0, 88.0), 2);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(severity_tier(5, true), Severity::Critical);
        assert_eq!(severity_tier(4, true), Severity::High);
        assert_eq!(severity_tier(3, true), Severity::High);
        assert_eq!(severity_tier(2, false), Severity::Medium);
        assert_eq!(severity_tier(1, false), Severity::Medium);
        assert_eq!(severity_tier(0, true), Severity::Low);
        assert_eq!(severity_tier(0, false), Severity::Normal);
    }

    #[test]
    fn test_hypotension_alone_is_low() {
        let mut sample = normal();
        sample.bp_systolic = 85.0;
        let result = assess(&sample, &ThresholdTable::standard());

        assert_eq!(result.anomaly_types, vec![AnomalyType::Hypotension]);
        assert_eq!(result.points.total(), 0);
        assert!(result.has_findings());
        assert_eq!(result.severity, Severity::Low);
        assert_eq!(
            result.recommendations,
            vec!["Ensure adequate hydration. Monitor for syncope.".to_string()]
        );
    }

    #[test]
    fn test_tachycardia_excludes_bradycardia() {
        let mut sample = normal();
        sample.heart_rate = 130.0;
        let types = identify_anomaly_types(&sample, &ThresholdTable::standard());
        assert_eq!(types, vec![AnomalyType::Tachycardia]);
    }

    #[test]
    fn test_high_severity_prepends_attention() {
        // hr 110 → +2, spo2 93 → +1 = 3 (high)
        let mut sample = normal();
        sample.heart_rate = 110.0;
        sample.spo2 = 93.0;
        let result = assess(&sample, &ThresholdTable::standard());
        assert_eq!(result.severity, Severity::High);
        assert_eq!(
            result.recommendations,
            vec![
                IMMEDIATE_ATTENTION.to_string(),
                "Check for dehydration or anxiety. Monitor continuously.".to_string(),
                "URGENT: Check oxygen supplementation. Monitor respiratory status.".to_string(),
            ]
        );
    }

    /// Pushing any single vital further from normal never lowers the total
    #[test]
    fn test_severity_points_are_monotonic() {
        let base = normal();
        let steps: Vec<f64> = (0..=200).map(|i| i as f64 * 0.5).collect();

        let mut checks: Vec<Box<dyn Fn(f64) -> VitalSample>> = Vec::new();
        checks.push(Box::new(|d| VitalSample { heart_rate: 75.0 + d, ..normal() }));
        checks.push(Box::new(|d| VitalSample { heart_rate: 75.0 - d, ..normal() }));
        checks.push(Box::new(|d| VitalSample { spo2: 98.0 - d / 10.0, ..normal() }));
        checks.push(Box::new(|d| VitalSample { temperature: 98.6 + d / 20.0, ..normal() }));
        checks.push(Box::new(|d| VitalSample { bp_systolic: 120.0 + d / 2.0, ..normal() }));
        checks.push(Box::new(|d| VitalSample { bp_diastolic: 80.0 + d / 4.0, ..normal() }));

        assert_eq!(severity_points(&base).total(), 0);
        for make in &checks {
            let mut previous = 0;
            for &d in &steps {
                let total = severity_points(&make(d)).total();
                assert!(total >= previous, "points dropped at deviation {}", d);
                previous = total;
            }
        }
    }

    #[test]
    fn test_tags_follow_table() {
        let mut table = ThresholdTable::standard();
        table.heart_rate.min = 40.0;
        let mut sample = normal();
        sample.heart_rate = 45.0;
        assert_eq!(identify_anomaly_types(&sample, &table), vec![AnomalyType::None]);
    }
}
