//! Isolation Forest - unsupervised outlier model
//!
//! Each tree isolates points by random axis-aligned splits; anomalies end up
//! on short paths. Scores follow the `score_samples` convention: values lie
//! in `[-1, 0]` and lower means more anomalous.
//!
//! Training is fully deterministic for a given seed (`StdRng`).

use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::logic::error::{DetectorError, Result};
use super::scaler::ensure_finite;

/// Euler-Mascheroni constant
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Minimum rows needed to grow a tree
pub const MIN_FIT_SAMPLES: usize = 2;

// ============================================================================
// PARAMETERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    /// Cap on the per-tree sub-sample (actual size is `min(cap, n)`)
    pub max_samples: usize,
    pub contamination: f64,
    pub random_seed: u64,
}

/// Per-sample model output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierScore {
    pub score: f64,
    pub is_anomaly: bool,
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        size: usize,
    },
}

/// Flat, pre-order tree: children always sit after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationTree {
    pub nodes: Vec<Node>,
}

impl IsolationTree {
    fn grow(
        data: &ArrayView2<f64>,
        indices: &mut [usize],
        max_depth: usize,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.build(data, indices, 0, max_depth, rng);
        tree
    }

    fn build(
        &mut self,
        data: &ArrayView2<f64>,
        indices: &mut [usize],
        depth: usize,
        max_depth: usize,
        rng: &mut StdRng,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { size: indices.len() });

        if depth >= max_depth || indices.len() <= 1 {
            return id;
        }

        // Only features that still vary inside this node can split it
        let candidates: Vec<(usize, f64, f64)> = (0..data.ncols())
            .filter_map(|feature| {
                let (lo, hi) = column_range(data, indices, feature);
                (hi > lo).then_some((feature, lo, hi))
            })
            .collect();

        if candidates.is_empty() {
            return id;
        }

        let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
        let threshold = rng.gen_range(lo..hi);

        let split = partition(indices, |row| data[[row, feature]] <= threshold);
        let (left_rows, right_rows) = indices.split_at_mut(split);

        let left = self.build(data, left_rows, depth + 1, max_depth, rng);
        let right = self.build(data, right_rows, depth + 1, max_depth, rng);

        self.nodes[id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        id
    }

    /// Depth of the leaf reached by `row`, plus the expected remaining depth
    /// for the unsplit points in that leaf.
    pub fn path_length(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = 0;
        let mut depth = 0.0;

        loop {
            match &self.nodes[node] {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { *left } else { *right };
                    depth += 1.0;
                }
            }
        }
    }

    fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".to_string());
        }
        for (id, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature >= n_features {
                    return Err(format!("node {} splits on unknown feature {}", id, feature));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {} has a non-finite threshold", id));
                }
                // Forward-only links rule out cycles
                for child in [*left, *right] {
                    if child <= id || child >= self.nodes.len() {
                        return Err(format!("node {} has invalid child {}", id, child));
                    }
                }
            }
        }
        Ok(())
    }
}

fn column_range(data: &ArrayView2<f64>, indices: &[usize], feature: usize) -> (f64, f64) {
    indices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &row| {
        let v = data[[row, feature]];
        (lo.min(v), hi.max(v))
    })
}

/// In-place partition; returns the count of rows that go left.
fn partition(indices: &mut [usize], mut goes_left: impl FnMut(usize) -> bool) -> usize {
    let mut split = 0;
    for i in 0..indices.len() {
        if goes_left(indices[i]) {
            indices.swap(i, split);
            split += 1;
        }
    }
    split
}

/// Average path length of an unsuccessful BST search over `n` points
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated percentile, `q` in [0, 100]
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationForest {
    pub params: ForestParams,
    pub n_features: usize,
    /// Actual per-tree sub-sample size
    pub sample_size: usize,
    /// Training-score percentile at the contamination tail
    pub offset: f64,
    pub trees: Vec<IsolationTree>,
}

impl IsolationForest {
    /// Fit on an already-scaled matrix
    pub fn fit(params: ForestParams, data: &Array2<f64>) -> Result<Self> {
        let n = data.nrows();
        if n < MIN_FIT_SAMPLES {
            return Err(DetectorError::InsufficientData {
                required: MIN_FIT_SAMPLES,
                got: n,
            });
        }
        if params.n_estimators == 0 {
            return Err(DetectorError::invalid_parameter("n_estimators", "must be at least 1"));
        }
        if !(params.contamination > 0.0 && params.contamination <= 0.5) {
            return Err(DetectorError::invalid_parameter(
                "contamination",
                format!("must be in (0, 0.5], got {}", params.contamination),
            ));
        }
        ensure_finite(data)?;

        let sample_size = params.max_samples.min(n).max(MIN_FIT_SAMPLES);
        let max_depth = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(params.random_seed);
        let view = data.view();

        let trees = (0..params.n_estimators)
            .map(|_| {
                // Sub-sample without replacement
                let mut rows = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();
                IsolationTree::grow(&view, &mut rows, max_depth, &mut rng)
            })
            .collect();

        let mut forest = Self {
            n_features: data.ncols(),
            sample_size,
            offset: 0.0,
            trees,
            params,
        };

        let training_scores = forest.score_samples(data)?;
        forest.offset = percentile(&training_scores, 100.0 * forest.params.contamination);

        log::debug!(
            "Isolation forest fit: {} trees, sample_size={}, max_depth={}, offset={:.5}",
            forest.trees.len(),
            sample_size,
            max_depth,
            forest.offset
        );

        Ok(forest)
    }

    /// Continuous outlier score per row (lower = more anomalous)
    pub fn score_samples(&self, data: &Array2<f64>) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(DetectorError::ModelNotTrained);
        }
        if data.ncols() != self.n_features {
            return Err(DetectorError::InvalidInput(format!(
                "forest expects {} features, got {}",
                self.n_features,
                data.ncols()
            )));
        }
        ensure_finite(data)?;

        let normalizer = average_path_length(self.sample_size);
        let n_trees = self.trees.len() as f64;

        Ok(data
            .rows()
            .into_iter()
            .map(|row| {
                let mean_depth =
                    self.trees.iter().map(|t| t.path_length(row)).sum::<f64>() / n_trees;
                -(2f64.powf(-mean_depth / normalizer))
            })
            .collect())
    }

    /// Scores plus binary verdicts. A sample is an outlier when its score
    /// falls below the contamination offset.
    pub fn predict(&self, data: &Array2<f64>) -> Result<Vec<OutlierScore>> {
        Ok(self
            .score_samples(data)?
            .into_iter()
            .map(|score| OutlierScore {
                score,
                is_anomaly: score - self.offset < 0.0,
            })
            .collect())
    }

    /// Structural check for deserialized forests
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.n_features != n_features {
            return Err(format!(
                "forest width mismatch: expected {}, got {}",
                n_features, self.n_features
            ));
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        if self.sample_size < MIN_FIT_SAMPLES {
            return Err(format!("invalid sample_size {}", self.sample_size));
        }
        if !self.offset.is_finite() {
            return Err("non-finite decision offset".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features).map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}
