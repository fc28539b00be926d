use super::generator::HealthDataGenerator;
use super::record::{ActivityLevel, InjectedAnomaly, LabeledRecord};
use super::writer::{read_records, write_records, DatasetWriter};
use super::summarize;
use chrono::{TimeZone, Utc};
use tempfile::tempdir;
use std::fs;

fn generator(samples: usize, rate: f64, seed: u64) -> HealthDataGenerator {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    HealthDataGenerator::new(samples, rate, seed)
        .unwrap()
        .with_start_time(start)
}

#[test]
fn test_exact_anomaly_count() {
    let records = generator(1000, 0.3, 7).generate_dataset();
    assert_eq!(records.len(), 1000);
    assert_eq!(records.iter().filter(|r| r.is_anomaly).count(), 300);

    // floor, not round
    let records = generator(15, 0.3, 7).generate_dataset();
    assert_eq!(records.iter().filter(|r| r.is_anomaly).count(), 4);
}

#[test]
fn test_five_minute_cadence() {
    let records = generator(20, 0.0, 1).generate_dataset();
    for pair in records.windows(2) {
        assert_eq!((pair[1].timestamp - pair[0].timestamp).num_minutes(), 5);
    }
    assert_eq!(records[0].timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_normal_vitals_within_clip_ranges() {
    let records = generator(500, 0.0, 3).generate_dataset();
    for r in &records {
        assert!(!r.is_anomaly);
        assert_eq!(r.anomaly_type, InjectedAnomaly::None);
        assert_eq!(r.severity, "normal");
        assert!((60.0..=100.0).contains(&r.heart_rate));
        assert!((95.0..=99.0).contains(&r.spo2));
        assert!((97.0..=99.0).contains(&r.temperature));
        assert!((110.0..=130.0).contains(&r.bp_systolic));
        assert!((70.0..=85.0).contains(&r.bp_diastolic));
        assert_eq!(r.bp_systolic, r.bp_systolic.round());
    }
}

#[test]
fn test_injected_labels_match_kind() {
    let mut gen = generator(1, 0.0, 11);
    let base = gen.generate_normal_vitals(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());

    let hypoxia = gen.inject_anomaly(base.clone(), Some(InjectedAnomaly::Hypoxia));
    assert!(hypoxia.is_anomaly);
    assert_eq!(hypoxia.severity, "critical");
    assert!(hypoxia.spo2 >= 85.0 && hypoxia.spo2 <= 92.0);

    let brady = gen.inject_anomaly(base.clone(), Some(InjectedAnomaly::Bradycardia));
    assert_eq!(brady.severity, "high");
    assert!(brady.heart_rate >= 35.0 && brady.heart_rate <= 50.0);

    let hypo = gen.inject_anomaly(base, Some(InjectedAnomaly::Hypotension));
    assert_eq!(hypo.severity, "medium");
    assert!(hypo.bp_systolic >= 80.0 && hypo.bp_systolic <= 100.0);
    assert!(hypo.bp_diastolic >= 50.0 && hypo.bp_diastolic <= 65.0);
}

#[test]
fn test_ids_format() {
    let records = generator(50, 0.3, 5).generate_dataset();
    for r in &records {
        assert!(r.patient_id.starts_with("PATIENT_") && r.patient_id.len() == 11);
        assert!(r.band_id.starts_with("BAND_") && r.band_id.len() == 8);
    }
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let a = generator(200, 0.3, 42).generate();
    let b = generator(200, 0.3, 42).generate();
    assert_eq!(a, b);

    let c = generator(200, 0.3, 43).generate();
    assert_ne!(a, c);
}

#[test]
fn test_exercise_episode_only_touches_normal_readings() {
    let mut gen = generator(600, 0.3, 9);
    let before = gen.generate_dataset();
    let mut after = before.clone();
    gen.add_realistic_patterns(&mut after);

    let mut changed = 0;
    for (b, a) in before.iter().zip(&after) {
        if b != a {
            changed += 1;
            assert!(!b.is_anomaly);
            assert!(a.heart_rate <= 110.0);
            assert!(a.heart_rate >= b.heart_rate);
            assert_eq!(a.activity_level, ActivityLevel::Moderate);
        }
    }
    assert!(changed > 0);
}

#[test]
fn test_invalid_rate_rejected() {
    assert!(HealthDataGenerator::new(10, 1.5, 1).is_err());
    assert!(HealthDataGenerator::new(10, -0.1, 1).is_err());
}

#[test]
fn test_jsonl_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("corpus.jsonl");
    let records = generator(25, 0.3, 2).generate_dataset();

    let written = write_records(&path, &records).unwrap();
    assert_eq!(written, 25);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 25);

    let loaded = read_records(&path).unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn test_writer_counts_appends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.jsonl");
    let records = generator(3, 0.0, 2).generate_dataset();

    let mut writer = DatasetWriter::create(&path).unwrap();
    for r in &records {
        writer.append(r).unwrap();
    }
    assert_eq!(writer.written(), 3);
    assert_eq!(writer.finish().unwrap(), 3);
}

#[test]
fn test_bad_line_reports_line_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.jsonl");
    let records = generator(2, 0.0, 2).generate_dataset();
    let mut body = String::new();
    body.push_str(&serde_json::to_string(&records[0]).unwrap());
    body.push_str("\n\n{\"heart_rate\": 70}\n");
    fs::write(&path, body).unwrap();

    let err = read_records(&path).unwrap_err().to_string();
    assert!(err.contains("line 3"), "{}", err);
}

#[test]
fn test_record_to_sample_keeps_metadata() {
    let records = generator(1, 0.0, 2).generate_dataset();
    let record: &LabeledRecord = &records[0];
    let sample = record.to_sample();
    assert_eq!(sample.heart_rate, record.heart_rate);
    assert_eq!(sample.patient_id.as_deref(), Some(record.patient_id.as_str()));
}

#[test]
fn test_summary_counts() {
    let records = generator(100, 0.3, 4).generate_dataset();
    let summary = summarize(&records);
    assert_eq!(summary.total, 100);
    assert_eq!(summary.anomalies, 30);
    assert_eq!(summary.normal, 70);
    assert_eq!(summary.by_type.values().sum::<usize>(), 30);
    assert_eq!(summary.by_severity.values().sum::<usize>(), 30);
}
