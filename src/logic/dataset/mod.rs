//! Dataset Module - Labelled Training Data
//!
//! Synthetic labelled vitals for training and evaluation, stored as JSONL.

pub mod generator;
pub mod record;
pub mod writer;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::Serialize;

pub use generator::HealthDataGenerator;
pub use record::{ActivityLevel, InjectedAnomaly, LabeledRecord};
pub use writer::{read_records, write_records, DatasetWriter};

/// Class balance of a corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub normal: usize,
    pub anomalies: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_severity: BTreeMap<String, usize>,
}

pub fn summarize(records: &[LabeledRecord]) -> DatasetSummary {
    let mut summary = DatasetSummary {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        if !record.is_anomaly {
            summary.normal += 1;
            continue;
        }
        summary.anomalies += 1;

        *summary.by_type.entry(record.anomaly_type.as_str().to_string()).or_insert(0) += 1;
        *summary.by_severity.entry(record.severity.clone()).or_insert(0) += 1;
    }

    summary
}
