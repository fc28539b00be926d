//! Features Module - Feature Derivation Engine
//!
//! Turns raw vital samples into versioned feature vectors for the outlier
//! model. Pure functions of the input (batch window state never leaks
//! between calls).

pub mod layout;
pub mod sample;
pub mod vector;
pub mod window;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use sample::VitalSample;
pub use vector::{derive_batch, derive_one, to_matrix, FeatureVector};
pub use window::HeartRateWindow;
