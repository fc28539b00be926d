//! Model Module - Outlier Model
//!
//! Standard scaler + isolation forest, the normal-range table that travels
//! with them, and train-time evaluation.

pub mod evaluation;
pub mod forest;
pub mod scaler;
pub mod threshold;

// Re-export common types
pub use evaluation::{ConfusionMatrix, TrainingMetrics};
pub use forest::{ForestParams, IsolationForest, OutlierScore};
pub use scaler::StandardScaler;
pub use threshold::{ThresholdTable, VitalRange};
