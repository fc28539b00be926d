//! Train-time evaluation: stratified hold-out split and confusion metrics
//!
//! Diagnostic only. Nothing here feeds back into inference.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Split row indices into (train, test), stratified by label.
/// Each class contributes `round(class_size * test_fraction)` rows to the
/// test split. Both outputs are returned in corpus order.
pub fn stratified_split(labels: &[bool], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for class in [false, true] {
        let mut rows: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == class)
            .map(|(i, _)| i)
            .collect();
        rows.shuffle(&mut rng);

        let n_test = ((rows.len() as f64 * test_fraction).round() as usize).min(rows.len());
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

/// Binary confusion matrix (positive = anomaly)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[bool], predicted: &[bool]) -> Self {
        let mut cm = Self::default();
        for (&truth, &guess) in actual.iter().zip(predicted) {
            match (truth, guess) {
                (false, false) => cm.true_negatives += 1,
                (false, true) => cm.false_positives += 1,
                (true, false) => cm.false_negatives += 1,
                (true, true) => cm.true_positives += 1,
            }
        }
        cm
    }

    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_negatives + self.true_positives, self.total())
    }

    /// Recall on the anomaly class
    pub fn sensitivity(&self) -> f64 {
        ratio(self.true_positives, self.false_negatives + self.true_positives)
    }

    pub fn specificity(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }
}

/// Undefined ratios report 0
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Metrics returned by `train` and persisted in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub accuracy: f64,
    pub sensitivity: f64,
    pub specificity: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub train_size: usize,
    pub test_size: usize,
}

impl TrainingMetrics {
    pub fn from_confusion(confusion_matrix: ConfusionMatrix, train_size: usize) -> Self {
        Self {
            accuracy: confusion_matrix.accuracy(),
            sensitivity: confusion_matrix.sensitivity(),
            specificity: confusion_matrix.specificity(),
            test_size: confusion_matrix.total(),
            confusion_matrix,
            train_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_matrix_counts() {
        let actual = [false, false, true, true, true];
        let predicted = [false, true, true, false, true];
        let cm = ConfusionMatrix::from_predictions(&actual, &predicted);

        assert_eq!(cm.true_negatives, 1);
        assert_eq!(cm.false_positives, 1);
        assert_eq!(cm.false_negatives, 1);
        assert_eq!(cm.true_positives, 2);
        assert!((cm.accuracy() - 0.6).abs() < 1e-12);
        assert!((cm.sensitivity() - 2.0 / 3.0).abs() < 1e-12);
        assert!((cm.specificity() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_ratios_are_zero() {
        let cm = ConfusionMatrix::from_predictions(&[false, false], &[false, false]);
        assert_eq!(cm.sensitivity(), 0.0);
        assert_eq!(cm.specificity(), 1.0);
        assert_eq!(ConfusionMatrix::default().accuracy(), 0.0);
    }

    #[test]
    fn test_stratified_split_preserves_class_ratio() {
        let labels: Vec<bool> = (0..100).map(|i| i % 10 < 3).collect(); // 30% positive
        let (train, test) = stratified_split(&labels, 0.2, 42);

        assert_eq!(train.len() + test.len(), 100);
        assert_eq!(test.len(), 20);
        assert_eq!(test.iter().filter(|&&i| labels[i]).count(), 6);

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_stratified_split_is_seeded() {
        let labels: Vec<bool> = (0..50).map(|i| i % 4 == 0).collect();
        assert_eq!(stratified_split(&labels, 0.2, 7), stratified_split(&labels, 0.2, 7));
    }

    #[test]
    fn test_metrics_from_confusion() {
        let cm = ConfusionMatrix {
            true_negatives: 7,
            false_positives: 1,
            false_negatives: 1,
            true_positives: 1,
        };
        let metrics = TrainingMetrics::from_confusion(cm, 40);
        assert_eq!(metrics.test_size, 10);
        assert_eq!(metrics.train_size, 40);
        assert!((metrics.accuracy - 0.8).abs() < 1e-12);
    }
}
