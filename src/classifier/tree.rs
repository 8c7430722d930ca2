//! Decision tree classifier (CART with Gini impurity).
//!
//! Used standalone for debugging and as the base learner of the random
//! forest. Splits minimize weighted Gini impurity; candidate thresholds
//! are midpoints between consecutive distinct feature values. With a
//! feature-candidate budget set (as the forest does), each split considers
//! a random subset of features drawn from a seeded generator, so a given
//! seed always grows the same tree.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::classifier::{Classifier, majority_class};
use crate::error::{GraymailError, Result};
use crate::vectorize::FeatureMatrix;

#[derive(Clone, Debug)]
enum TreeNode {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// A single CART decision tree.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier {
    /// Maximum tree depth; `None` grows until purity or sample limits.
    max_depth: Option<usize>,
    /// Minimum samples required to consider splitting a node.
    min_samples_split: usize,
    /// Minimum samples each child must keep.
    min_samples_leaf: usize,
    /// Number of features examined per split; `None` examines all.
    feature_candidates: Option<usize>,
    seed: u64,
    root: Option<TreeNode>,
    n_classes: usize,
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTreeClassifier {
    /// Create a tree with unbounded depth and minimal stopping limits.
    pub fn new() -> Self {
        DecisionTreeClassifier {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            feature_candidates: None,
            seed: 0,
            root: None,
            n_classes: 0,
        }
    }

    /// Set the maximum depth (`None` = unbounded).
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum samples required to split a node.
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    /// Set the minimum samples per leaf.
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }

    /// Restrict each split to a random subset of this many features.
    pub fn with_feature_candidates(mut self, count: usize) -> Self {
        self.feature_candidates = Some(count);
        self
    }

    /// Set the seed for feature subsampling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn build(
        &self,
        x: &FeatureMatrix,
        y: &[usize],
        indices: &[usize],
        depth: usize,
        rng: &mut StdRng,
    ) -> TreeNode {
        let class = majority_class(indices.iter().map(|&i| y[i]), self.n_classes);

        let depth_exhausted = self.max_depth.is_some_and(|limit| depth >= limit);
        let too_small = indices.len() < self.min_samples_split
            || indices.len() < 2 * self.min_samples_leaf;
        let pure = indices.iter().all(|&i| y[i] == y[indices[0]]);

        if depth_exhausted || too_small || pure {
            return TreeNode::Leaf { class };
        }

        let Some((feature, threshold)) = self.best_split(x, y, indices, rng) else {
            return TreeNode::Leaf { class };
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| x.value(i, feature) <= threshold);

        let left = self.build(x, y, &left_indices, depth + 1, rng);
        let right = self.build(x, y, &right_indices, depth + 1, rng);

        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Pick the (feature, threshold) pair with the lowest weighted child
    /// Gini impurity, or `None` when no split improves on the node.
    fn best_split(
        &self,
        x: &FeatureMatrix,
        y: &[usize],
        indices: &[usize],
        rng: &mut StdRng,
    ) -> Option<(usize, f64)> {
        let n_features = x.n_columns();
        let features: Vec<usize> = match self.feature_candidates {
            Some(budget) if budget < n_features => {
                let mut all: Vec<usize> = (0..n_features).collect();
                all.shuffle(rng);
                all.truncate(budget);
                all
            }
            _ => (0..n_features).collect(),
        };

        let parent_impurity = gini(indices.iter().map(|&i| y[i]), self.n_classes);
        let mut best: Option<(usize, f64, f64)> = None;

        for feature in features {
            if let Some((threshold, impurity)) = self.best_threshold(x, y, indices, feature) {
                if impurity + 1e-12 < parent_impurity
                    && best.is_none_or(|(_, _, best_impurity)| impurity < best_impurity)
                {
                    best = Some((feature, threshold, impurity));
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }

    /// Sweep sorted values of one feature, tracking class counts on each
    /// side, and return the threshold with the lowest weighted impurity.
    fn best_threshold(
        &self,
        x: &FeatureMatrix,
        y: &[usize],
        indices: &[usize],
        feature: usize,
    ) -> Option<(f64, f64)> {
        let mut pairs: Vec<(f64, usize)> = indices
            .iter()
            .map(|&i| (x.value(i, feature), y[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = pairs.len();
        let mut left_counts = vec![0usize; self.n_classes];
        let mut right_counts = vec![0usize; self.n_classes];
        for &(_, class) in &pairs {
            right_counts[class] += 1;
        }

        let mut best: Option<(f64, f64)> = None;
        for i in 1..n {
            let (prev_value, prev_class) = pairs[i - 1];
            left_counts[prev_class] += 1;
            right_counts[prev_class] -= 1;

            let value = pairs[i].0;
            if value <= prev_value {
                continue;
            }
            if i < self.min_samples_leaf || n - i < self.min_samples_leaf {
                continue;
            }

            let left_impurity = gini_from_counts(&left_counts, i);
            let right_impurity = gini_from_counts(&right_counts, n - i);
            let weighted = (i as f64 * left_impurity + (n - i) as f64 * right_impurity) / n as f64;

            if best.is_none_or(|(_, best_impurity)| weighted < best_impurity) {
                best = Some(((prev_value + value) / 2.0, weighted));
            }
        }

        best
    }

    fn predict_row(&self, x: &FeatureMatrix, row: usize) -> Result<usize> {
        let mut node = self.root.as_ref().ok_or_else(|| {
            GraymailError::invalid_operation("DecisionTreeClassifier::predict called before fit")
        })?;

        loop {
            match node {
                TreeNode::Leaf { class } => return Ok(*class),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x.value(row, *feature) <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn gini(labels: impl Iterator<Item = usize>, n_classes: usize) -> f64 {
    let mut counts = vec![0usize; n_classes];
    let mut total = 0usize;
    for label in labels {
        counts[label] += 1;
        total += 1;
    }
    gini_from_counts(&counts, total)
}

fn gini_from_counts(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let sum_squares: f64 = counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total as f64;
            p * p
        })
        .sum();
    1.0 - sum_squares
}

impl Classifier for DecisionTreeClassifier {
    fn fit(&mut self, x: &FeatureMatrix, y: &[usize]) -> Result<()> {
        if x.n_rows() != y.len() {
            return Err(GraymailError::model(format!(
                "feature matrix has {} rows but {} labels were given",
                x.n_rows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(GraymailError::model("cannot fit on an empty training set"));
        }

        self.n_classes = y.iter().max().copied().unwrap_or(0) + 1;
        let indices: Vec<usize> = (0..y.len()).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.root = Some(self.build(x, y, &indices, 0, &mut rng));

        Ok(())
    }

    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<usize>> {
        (0..x.n_rows()).map(|row| self.predict_row(x, row)).collect()
    }

    fn name(&self) -> &'static str {
        "decision_tree"
    }
}
