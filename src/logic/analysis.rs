//! Batch analysis summary
//!
//! Aggregates per-reading predictions into the `analyze_batch` response.

use serde::{Deserialize, Serialize};

use crate::logic::detector::PredictionResult;
use crate::logic::triage::Severity;

/// How many per-reading entries the summary echoes back
pub const SUMMARY_PREVIEW_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub is_anomaly: bool,
    pub risk_score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub total_readings: usize,
    pub anomaly_count: usize,
    pub anomaly_rate: f64,
    pub average_risk: f64,
    pub max_risk: f64,
    pub min_risk: f64,
    pub critical_count: usize,
    pub high_count: usize,
    pub predictions: Vec<PredictionSummary>,
}

/// Summarize a batch. An empty batch yields all zeros.
pub fn summarize(results: &[PredictionResult]) -> BatchAnalysis {
    if results.is_empty() {
        return BatchAnalysis::default();
    }

    let total = results.len();
    let anomaly_count = results.iter().filter(|r| r.is_anomaly).count();
    let risks = results.iter().map(|r| r.risk_score);

    let (sum, max, min) = risks.fold((0.0, f64::MIN, f64::MAX), |(sum, max, min), risk| {
        (sum + risk, max.max(risk), min.min(risk))
    });

    BatchAnalysis {
        total_readings: total,
        anomaly_count,
        anomaly_rate: anomaly_count as f64 / total as f64,
        average_risk: sum / total as f64,
        max_risk: max,
        min_risk: min,
        critical_count: results.iter().filter(|r| r.severity == Severity::Critical).count(),
        high_count: results.iter().filter(|r| r.severity == Severity::High).count(),
        predictions: results
            .iter()
            .take(SUMMARY_PREVIEW_LEN)
            .map(|r| PredictionSummary {
                is_anomaly: r.is_anomaly,
                risk_score: r.risk_score,
                severity: r.severity,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::triage::AnomalyType;

    fn result(is_anomaly: bool, risk_score: f64, severity: Severity) -> PredictionResult {
        PredictionResult {
            is_anomaly,
            anomaly_score: -0.5,
            risk_score,
            severity,
            anomaly_types: vec![AnomalyType::None],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_empty_batch_is_zeroed() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_readings, 0);
        assert_eq!(summary.anomaly_rate, 0.0);
        assert_eq!(summary.max_risk, 0.0);
        assert_eq!(summary.min_risk, 0.0);
        assert!(summary.predictions.is_empty());
    }

    #[test]
    fn test_aggregates() {
        let results = vec![
            result(true, 80.0, Severity::Critical),
            result(false, 10.0, Severity::Normal),
            result(true, 45.0, Severity::High),
            result(false, 25.0, Severity::Medium),
        ];
        let summary = summarize(&results);

        assert_eq!(summary.total_readings, 4);
        assert_eq!(summary.anomaly_count, 2);
        assert_eq!(summary.anomaly_rate, 0.5);
        assert_eq!(summary.average_risk, 40.0);
        assert_eq!(summary.max_risk, 80.0);
        assert_eq!(summary.min_risk, 10.0);
        assert_eq!(summary.critical_count, 1);
        assert_eq!(summary.high_count, 1);
        assert_eq!(summary.predictions.len(), 4);
        assert_eq!(summary.predictions[2].severity, Severity::High);
    }

    #[test]
    fn test_anomaly_count_matches_flags() {
        let results: Vec<_> = (0..37)
            .map(|i| result(i % 3 == 0, i as f64, Severity::Low))
            .collect();
        let summary = summarize(&results);

        assert_eq!(summary.anomaly_count, results.iter().filter(|r| r.is_anomaly).count());
        assert_eq!(summary.predictions.len(), SUMMARY_PREVIEW_LEN);
        assert_eq!(summary.predictions[9].risk_score, 9.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(summarize(&[result(true, 50.0, Severity::Critical)])).unwrap();
        for key in [
            "total_readings",
            "anomaly_count",
            "anomaly_rate",
            "average_risk",
            "max_risk",
            "min_risk",
            "critical_count",
            "high_count",
            "predictions",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["predictions"][0]["severity"], "critical");
    }
}
