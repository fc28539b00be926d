//! Risk Scorer
//!
//! Blends the outlier score with the rule tier into a 0..=100 risk value.
//! Lower outlier scores are more anomalous, so `1 / (1 + e^score)` grows as
//! the model grows more suspicious.

use crate::logic::triage::Severity;

pub const MIN_RISK: f64 = 0.0;
pub const MAX_RISK: f64 = 100.0;

/// Decreasing logistic
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + x.exp())
}

pub fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 1.0,
        Severity::High => 0.75,
        Severity::Medium => 0.5,
        Severity::Low => 0.25,
        Severity::Normal => 0.25,
    }
}

/// Risk in `[0, 100]`, higher = more concerning
pub fn risk_score(anomaly_score: f64, severity: Severity) -> f64 {
    let raw = sigmoid(anomaly_score) * 100.0 * severity_weight(severity);
    if raw.is_nan() {
        return MIN_RISK;
    }
    raw.clamp(MIN_RISK, MAX_RISK)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Severity; 5] = [
        Severity::Normal,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(-1.0) > sigmoid(1.0));
    }

    #[test]
    fn test_risk_bounds() {
        let scores = [-1000.0, -1.0, -0.7, -0.5, -0.3, 0.0, 0.5, 1000.0, f64::INFINITY, f64::NEG_INFINITY];
        for severity in ALL {
            for &score in &scores {
                let risk = risk_score(score, severity);
                assert!((MIN_RISK..=MAX_RISK).contains(&risk), "{} / {} -> {}", score, severity, risk);
            }
        }
    }

    #[test]
    fn test_more_anomalous_scores_higher_risk() {
        assert!(risk_score(-0.8, Severity::Medium) > risk_score(-0.4, Severity::Medium));
    }

    #[test]
    fn test_tier_weighting() {
        let score = -0.6;
        assert!(risk_score(score, Severity::Critical) > risk_score(score, Severity::High));
        assert!(risk_score(score, Severity::High) > risk_score(score, Severity::Medium));
        assert!(risk_score(score, Severity::Medium) > risk_score(score, Severity::Low));
        assert_eq!(risk_score(score, Severity::Low), risk_score(score, Severity::Normal));
    }

    #[test]
    fn test_known_value() {
        // score -0.5, critical: 100 / (1 + e^-0.5)
        let expected = 100.0 / (1.0 + (-0.5f64).exp());
        assert!((risk_score(-0.5, Severity::Critical) - expected).abs() < 1e-12);
        assert!((expected - 62.245_933_12).abs() < 1e-6);
    }
}
