//! Triage Rules & Thresholds
//!
//! Constants for the severity point system. No logic here.

// ============================================================================
// HEART RATE
// ============================================================================

/// Reference resting heart rate for deviation scoring
pub const REFERENCE_HEART_RATE: f64 = 75.0;

/// Relative deviation above this scores 2 points
pub const HR_DEVIATION_MAJOR: f64 = 0.3;

/// Relative deviation above this scores 1 point
pub const HR_DEVIATION_MINOR: f64 = 0.2;

// ============================================================================
// SPO2
// ============================================================================

/// Below this scores 3 points
pub const SPO2_SEVERE: f64 = 92.0;

/// Below this scores 1 point
pub const SPO2_LOW: f64 = 95.0;

// ============================================================================
// TEMPERATURE (°F)
// ============================================================================

/// Above this scores 2 points
pub const TEMP_HIGH_FEVER: f64 = 100.5;

/// Above this scores 1 point
pub const TEMP_FEVER: f64 = 99.5;

// ============================================================================
// BLOOD PRESSURE (mmHg)
// ============================================================================

/// Systolic / diastolic above these score 2 points
pub const BP_SYSTOLIC_HIGH: f64 = 140.0;
pub const BP_DIASTOLIC_HIGH: f64 = 90.0;

/// Systolic / diastolic above these score 1 point
pub const BP_SYSTOLIC_ELEVATED: f64 = 130.0;
pub const BP_DIASTOLIC_ELEVATED: f64 = 85.0;

// ============================================================================
// TIERS
// ============================================================================

pub const CRITICAL_MIN_POINTS: u8 = 5;
pub const HIGH_MIN_POINTS: u8 = 3;
pub const MEDIUM_MIN_POINTS: u8 = 1;

// ============================================================================
// MESSAGES
// ============================================================================

pub const IMMEDIATE_ATTENTION: &str = "IMMEDIATE MEDICAL ATTENTION REQUIRED";
pub const ROUTINE_MONITORING: &str = "Continue routine monitoring";
