//! Logic Module - Detection Engines
//!
//! ## Architecture
//! - `features/` - Feature derivation (raw vitals, rolling HR variance, ratios)
//! - `model/` - Scaler, isolation forest, threshold table, evaluation
//! - `triage/` - Threshold rules: severity points, anomaly types, advice
//! - `risk` - Outlier score × severity tier → 0..100 risk
//! - `detector/` - Facade owning the trained model, plus artifact save/load
//! - `analysis` - Batch summary
//! - `dataset/` - Synthetic labelled corpus and JSONL I/O

pub mod config;
pub mod error;

pub mod features;
pub mod model;
pub mod triage;
pub mod risk;

pub mod detector;
pub mod analysis;
pub mod dataset;
