//! Random forest classifier.
//!
//! Bootstrap-aggregated decision trees with per-split feature
//! subsampling. Each tree gets its own bootstrap sample and a seed
//! derived from the forest seed, so a fit is fully reproducible while
//! trees stay decorrelated. Tree construction runs in parallel with
//! `rayon`; prediction takes a majority vote across trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::tree::DecisionTreeClassifier;
use crate::classifier::{Classifier, majority_class};
use crate::error::{GraymailError, Result};
use crate::vectorize::FeatureMatrix;

/// Hyperparameters of a random forest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees.
    pub n_estimators: usize,
    /// Maximum depth per tree; `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// Minimum samples per leaf.
    pub min_samples_leaf: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        ForestParams {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl std::fmt::Display for ForestParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let depth = match self.max_depth {
            Some(d) => d.to_string(),
            None => "unbounded".to_string(),
        };
        write!(
            f,
            "n_estimators={}, max_depth={}, min_samples_split={}, min_samples_leaf={}",
            self.n_estimators, depth, self.min_samples_split, self.min_samples_leaf
        )
    }
}

/// Bootstrap-aggregated forest of [`DecisionTreeClassifier`]s.
#[derive(Clone, Debug)]
pub struct RandomForestClassifier {
    params: ForestParams,
    seed: u64,
    trees: Vec<DecisionTreeClassifier>,
    n_classes: usize,
}

impl RandomForestClassifier {
    /// Create a forest with the given hyperparameters and seed.
    pub fn new(params: ForestParams, seed: u64) -> Self {
        RandomForestClassifier {
            params,
            seed,
            trees: Vec::new(),
            n_classes: 0,
        }
    }

    /// The hyperparameters this forest was built with.
    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Number of fitted trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn fit_one_tree(
        &self,
        x: &FeatureMatrix,
        y: &[usize],
        tree_index: usize,
        feature_candidates: usize,
    ) -> Result<DecisionTreeClassifier> {
        let tree_seed = self.seed.wrapping_add(tree_index as u64);
        let mut rng = StdRng::seed_from_u64(tree_seed);

        // Bootstrap: sample n rows with replacement.
        let n = y.len();
        let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
        let x_sample = x.select_rows(&sample);
        let y_sample: Vec<usize> = sample.iter().map(|&i| y[i]).collect();

        let mut tree = DecisionTreeClassifier::new()
            .with_max_depth(self.params.max_depth)
            .with_min_samples_split(self.params.min_samples_split)
            .with_min_samples_leaf(self.params.min_samples_leaf)
            .with_feature_candidates(feature_candidates)
            .with_seed(tree_seed);
        tree.fit(&x_sample, &y_sample)?;

        Ok(tree)
    }
}

impl Classifier for RandomForestClassifier {
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
        if self.params.n_estimators == 0 {
            return Err(GraymailError::model(
                "a forest needs at least one estimator",
            ));
        }

        self.n_classes = y.iter().max().copied().unwrap_or(0) + 1;

        // sqrt(n_features) candidates per split, at least one.
        let feature_candidates = ((x.n_columns() as f64).sqrt().floor() as usize).max(1);

        self.trees = (0..self.params.n_estimators)
            .into_par_iter()
            .map(|t| self.fit_one_tree(x, y, t, feature_candidates))
            .collect::<Result<Vec<_>>>()?;

        Ok(())
    }

    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<usize>> {
        if self.trees.is_empty() {
            return Err(GraymailError::invalid_operation(
                "RandomForestClassifier::predict called before fit",
            ));
        }

        let votes: Vec<Vec<usize>> = self
            .trees
            .par_iter()
            .map(|tree| tree.predict(x))
            .collect::<Result<Vec<_>>>()?;

        let predictions = (0..x.n_rows())
            .map(|row| majority_class(votes.iter().map(|v| v[row]), self.n_classes))
            .collect();

        Ok(predictions)
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}
