use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::features::VitalSample;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
}

/// Ground-truth condition injected by the generator
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjectedAnomaly {
    None,
    Bradycardia,
    Tachycardia,
    Hypoxia,
    Fever,
    Hypertension,
    Hypotension,
    IrregularPattern,
}

impl InjectedAnomaly {
    pub fn as_str(&self) -> &'static str {
        match self {
            InjectedAnomaly::None => "none",
            InjectedAnomaly::Bradycardia => "bradycardia",
            InjectedAnomaly::Tachycardia => "tachycardia",
            InjectedAnomaly::Hypoxia => "hypoxia",
            InjectedAnomaly::Fever => "fever",
            InjectedAnomaly::Hypertension => "hypertension",
            InjectedAnomaly::Hypotension => "hypotension",
            InjectedAnomaly::IrregularPattern => "irregular_pattern",
        }
    }

    /// Label severity attached to each injected condition
    pub fn severity_label(&self) -> &'static str {
        match self {
            InjectedAnomaly::None => "normal",
            InjectedAnomaly::Hypoxia => "critical",
            InjectedAnomaly::Bradycardia
            | InjectedAnomaly::Tachycardia
            | InjectedAnomaly::Hypertension => "high",
            InjectedAnomaly::Fever
            | InjectedAnomaly::Hypotension
            | InjectedAnomaly::IrregularPattern => "medium",
        }
    }
}

/// One labelled training row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub timestamp: DateTime<Utc>,
    pub patient_id: String,
    pub band_id: String,

    // Vitals
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub bp_systolic: f64,
    pub bp_diastolic: f64,
    pub ecg: f64,

    pub activity_level: ActivityLevel,

    // Labels
    pub is_anomaly: bool,
    pub anomaly_type: InjectedAnomaly,
    pub severity: String,
}

impl LabeledRecord {
    pub fn to_sample(&self) -> VitalSample {
        VitalSample {
            heart_rate: self.heart_rate,
            spo2: self.spo2,
            temperature: self.temperature,
            bp_systolic: self.bp_systolic,
            bp_diastolic: self.bp_diastolic,
            ecg: self.ecg,
            timestamp: Some(self.timestamp.to_rfc3339()),
            patient_id: Some(self.patient_id.clone()),
            band_id: Some(self.band_id.clone()),
        }
    }
}
