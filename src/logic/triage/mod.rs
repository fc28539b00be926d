//! Triage Module
//!
//! Rule-based clinical triage, independent of the outlier model. The
//! statistical model catches multivariate patterns; these rules guarantee
//! that obvious threshold breaches are always flagged and labelled.
//!
//! ## Structure
//! - `types`: Core types (Severity, AnomalyType, RuleAssessment)
//! - `rules`: Thresholds and constants
//! - `classifier`: Scoring, tagging and recommendation logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::triage::{assess, Severity};
//!
//! let result = assess(&sample, &ThresholdTable::standard());
//! if result.severity >= Severity::High {
//!     escalate();
//! }
//! ```

pub mod classifier;
pub mod rules;
pub mod types;

// Re-export main types for convenience
pub use types::{AnomalyType, PointBreakdown, RuleAssessment, Severity};

pub use rules::{IMMEDIATE_ATTENTION, ROUTINE_MONITORING};

pub use classifier::{assess, identify_anomaly_types, recommendations, severity_points, severity_tier};
