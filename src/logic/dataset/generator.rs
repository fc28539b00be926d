//! Synthetic labelled vitals
//!
//! Normal readings follow a circadian sine over the hour of day and are
//! clipped to healthy ranges. A fixed fraction of readings gets one injected
//! condition with a ground-truth label.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::logic::error::{DetectorError, Result};
use super::record::{ActivityLevel, InjectedAnomaly, LabeledRecord};

/// Spacing between consecutive readings
pub const READING_INTERVAL_MINUTES: i64 = 5;

/// How far back the first reading sits when no start time is given
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

const PATIENT_COUNT: u32 = 10;

const ACTIVITY_LEVELS: [ActivityLevel; 3] = [
    ActivityLevel::Sedentary,
    ActivityLevel::Light,
    ActivityLevel::Moderate,
];
const ACTIVITY_WEIGHTS: [f64; 3] = [0.5, 0.35, 0.15];

const ANOMALY_KINDS: [InjectedAnomaly; 7] = [
    InjectedAnomaly::Bradycardia,
    InjectedAnomaly::Tachycardia,
    InjectedAnomaly::Hypoxia,
    InjectedAnomaly::Fever,
    InjectedAnomaly::Hypertension,
    InjectedAnomaly::Hypotension,
    InjectedAnomaly::IrregularPattern,
];
const ANOMALY_WEIGHTS: [f64; 7] = [0.15, 0.15, 0.15, 0.15, 0.15, 0.10, 0.15];

// Exercise episode
const EXERCISE_MIN_READINGS: usize = 20;
const EXERCISE_LENGTH: usize = 6;
const EXERCISE_MARGIN: usize = 10;
const EXERCISE_HR_CAP: f64 = 110.0;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub struct HealthDataGenerator {
    num_samples: usize,
    anomaly_rate: f64,
    start_time: DateTime<Utc>,
    rng: StdRng,
    activity: WeightedIndex<f64>,
    anomalies: WeightedIndex<f64>,
}

impl HealthDataGenerator {
    pub fn new(num_samples: usize, anomaly_rate: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&anomaly_rate) {
            return Err(DetectorError::invalid_parameter(
                "anomaly_rate",
                format!("must be within [0, 1], got {}", anomaly_rate),
            ));
        }

        let activity = WeightedIndex::new(ACTIVITY_WEIGHTS)
            .map_err(|e| DetectorError::invalid_parameter("activity_weights", e.to_string()))?;
        let anomalies = WeightedIndex::new(ANOMALY_WEIGHTS)
            .map_err(|e| DetectorError::invalid_parameter("anomaly_weights", e.to_string()))?;

        Ok(Self {
            num_samples,
            anomaly_rate,
            start_time: Utc::now() - Duration::days(DEFAULT_HISTORY_DAYS),
            rng: StdRng::seed_from_u64(seed),
            activity,
            anomalies,
        })
    }

    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std_dev * z
    }

    /// One healthy reading at `at`. Patient and band ids are left empty.
    pub fn generate_normal_vitals(&mut self, at: DateTime<Utc>) -> LabeledRecord {
        let hour = at.hour() as f64 + at.minute() as f64 / 60.0;
        let circadian = (2.0 * std::f64::consts::PI * hour / 24.0).sin();

        let heart_rate = self.normal(70.0 + 5.0 * circadian, 8.0).clamp(60.0, 100.0);
        let spo2 = self.normal(97.0, 1.5).clamp(95.0, 99.0);
        let temperature = self.normal(98.6 + 0.5 * circadian, 0.3).clamp(97.0, 99.0);
        let bp_systolic = self.normal(120.0 + 3.0 * circadian, 8.0).clamp(110.0, 130.0);
        let bp_diastolic = self.normal(80.0 + 2.0 * circadian, 5.0).clamp(70.0, 85.0);
        let ecg = self.normal(0.0, 10.0);

        let activity_level = ACTIVITY_LEVELS[self.activity.sample(&mut self.rng)];

        LabeledRecord {
            timestamp: at,
            patient_id: String::new(),
            band_id: String::new(),
            heart_rate: round_to(heart_rate, 1),
            spo2: round_to(spo2, 1),
            temperature: round_to(temperature, 1),
            bp_systolic: round_to(bp_systolic, 0),
            bp_diastolic: round_to(bp_diastolic, 0),
            ecg: round_to(ecg, 2),
            activity_level,
            is_anomaly: false,
            anomaly_type: InjectedAnomaly::None,
            severity: InjectedAnomaly::None.severity_label().to_string(),
        }
    }

    /// Overwrite the affected vitals of `record` with an abnormal reading.
    /// A `None` kind draws one from the weighted table.
    pub fn inject_anomaly(&mut self, mut record: LabeledRecord, kind: Option<InjectedAnomaly>) -> LabeledRecord {
        let kind = match kind {
            Some(InjectedAnomaly::None) | None => ANOMALY_KINDS[self.anomalies.sample(&mut self.rng)],
            Some(kind) => kind,
        };

        match kind {
            InjectedAnomaly::Bradycardia => record.heart_rate = self.rng.gen_range(35.0..50.0),
            InjectedAnomaly::Tachycardia => record.heart_rate = self.rng.gen_range(120.0..180.0),
            InjectedAnomaly::Hypoxia => record.spo2 = self.rng.gen_range(85.0..92.0),
            InjectedAnomaly::Fever => record.temperature = self.rng.gen_range(100.5..104.0),
            InjectedAnomaly::Hypertension => {
                record.bp_systolic = self.rng.gen_range(140.0..180.0);
                record.bp_diastolic = self.rng.gen_range(90.0..120.0);
            }
            InjectedAnomaly::Hypotension => {
                record.bp_systolic = self.rng.gen_range(80.0..100.0);
                record.bp_diastolic = self.rng.gen_range(50.0..65.0);
            }
            InjectedAnomaly::IrregularPattern => {
                record.heart_rate += self.rng.gen_range(-30.0..30.0);
                record.ecg = self.rng.gen_range(-50.0..50.0);
            }
            InjectedAnomaly::None => {}
        }

        record.is_anomaly = true;
        record.anomaly_type = kind;
        record.severity = kind.severity_label().to_string();

        record.heart_rate = round_to(record.heart_rate, 1);
        record.spo2 = round_to(record.spo2, 1);
        record.temperature = round_to(record.temperature, 1);
        record.bp_systolic = round_to(record.bp_systolic, 1);
        record.bp_diastolic = round_to(record.bp_diastolic, 1);
        record.ecg = round_to(record.ecg, 1);
        record
    }

    /// Exactly `floor(num_samples * anomaly_rate)` labelled anomalies, one
    /// reading every five minutes from the start time.
    pub fn generate_dataset(&mut self) -> Vec<LabeledRecord> {
        let anomaly_count = (self.num_samples as f64 * self.anomaly_rate).floor() as usize;
        let anomaly_indices: HashSet<usize> =
            rand::seq::index::sample(&mut self.rng, self.num_samples, anomaly_count.min(self.num_samples))
                .into_iter()
                .collect();

        let mut records = Vec::with_capacity(self.num_samples);
        let mut current = self.start_time;

        for i in 0..self.num_samples {
            let mut record = self.generate_normal_vitals(current);
            if anomaly_indices.contains(&i) {
                record = self.inject_anomaly(record, None);
            }

            record.patient_id = format!("PATIENT_{:03}", self.rng.gen_range(1..=PATIENT_COUNT));
            record.band_id = format!("BAND_{:03}", self.rng.gen_range(1..=PATIENT_COUNT));

            records.push(record);
            current += Duration::minutes(READING_INTERVAL_MINUTES);
        }

        log::debug!("Generated {} readings ({} anomalies)", records.len(), anomaly_count);
        records
    }

    /// Add one exercise episode per patient: six consecutive normal readings
    /// get a heart-rate bump (capped) and moderate activity.
    pub fn add_realistic_patterns(&mut self, records: &mut [LabeledRecord]) {
        let mut patients: Vec<&str> = Vec::new();
        for record in records.iter() {
            if !patients.contains(&record.patient_id.as_str()) {
                patients.push(record.patient_id.as_str());
            }
        }
        let patients: Vec<String> = patients.into_iter().map(str::to_string).collect();

        for patient in patients {
            let rows: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.patient_id == patient)
                .map(|(i, _)| i)
                .collect();

            if rows.len() <= EXERCISE_MIN_READINGS {
                continue;
            }

            let start = self.rng.gen_range(EXERCISE_MARGIN..=rows.len() - EXERCISE_MARGIN);
            let end = (start + EXERCISE_LENGTH).min(rows.len());
            for &row in &rows[start..end] {
                let record = &mut records[row];
                if record.is_anomaly {
                    continue;
                }
                let bump: f64 = self.rng.gen_range(10.0..30.0);
                record.heart_rate = (record.heart_rate + bump).min(EXERCISE_HR_CAP);
                record.activity_level = ActivityLevel::Moderate;
            }
        }
    }

    /// Dataset with exercise episodes applied
    pub fn generate(&mut self) -> Vec<LabeledRecord> {
        let mut records = self.generate_dataset();
        self.add_realistic_patterns(&mut records);
        records
    }
}
