//! Triage Types
//!
//! Core types for rule-based triage. No logic here, only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Ordinal clinical urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// High and critical readings need someone at the bedside
    pub fn requires_immediate_attention(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ANOMALY TYPE
// ============================================================================

/// Physiological condition flagged by threshold rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyType {
    Bradycardia,
    Tachycardia,
    Hypoxia,
    Fever,
    Hypertension,
    Hypotension,
    /// No rule fired
    None,
}

impl AnomalyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::Bradycardia => "bradycardia",
            AnomalyType::Tachycardia => "tachycardia",
            AnomalyType::Hypoxia => "hypoxia",
            AnomalyType::Fever => "fever",
            AnomalyType::Hypertension => "hypertension",
            AnomalyType::Hypotension => "hypotension",
            AnomalyType::None => "none",
        }
    }

    /// Fixed advisory for this condition
    pub fn recommendation(&self) -> Option<&'static str> {
        match self {
            AnomalyType::Bradycardia => Some("Monitor for dizziness or fatigue. Consider ECG evaluation."),
            AnomalyType::Tachycardia => Some("Check for dehydration or anxiety. Monitor continuously."),
            AnomalyType::Hypoxia => Some("URGENT: Check oxygen supplementation. Monitor respiratory status."),
            AnomalyType::Fever => Some("Administer antipyretics. Monitor temperature trends."),
            AnomalyType::Hypertension => Some("Review medications. Check for stress factors."),
            AnomalyType::Hypotension => Some("Ensure adequate hydration. Monitor for syncope."),
            AnomalyType::None => None,
        }
    }
}

impl std::fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// POINT BREAKDOWN
// ============================================================================

/// How the severity total was reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBreakdown {
    pub heart_rate: u8,
    pub spo2: u8,
    pub temperature: u8,
    pub blood_pressure: u8,
}

impl PointBreakdown {
    pub fn total(&self) -> u8 {
        self.heart_rate + self.spo2 + self.temperature + self.blood_pressure
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Rule-engine output for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAssessment {
    pub points: PointBreakdown,
    pub severity: Severity,
    pub anomaly_types: Vec<AnomalyType>,
    pub recommendations: Vec<String>,
}

impl RuleAssessment {
    pub fn has_findings(&self) -> bool {
        self.anomaly_types.iter().any(|t| *t != AnomalyType::None)
    }
}
