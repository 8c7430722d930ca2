//! Multinomial Naive Bayes classifier.
//!
//! The multinomial event model over TF-IDF weights: each class accumulates
//! per-term weighted counts, smoothed additively so unseen terms keep a
//! nonzero likelihood, and prediction takes the argmax of log prior plus
//! the weighted sum of log likelihoods. Log space avoids the underflow a
//! direct probability product would hit on long documents.

use crate::classifier::Classifier;
use crate::error::{GraymailError, Result};
use crate::vectorize::FeatureMatrix;

/// Multinomial Naive Bayes with additive smoothing.
#[derive(Clone, Debug)]
pub struct MultinomialNb {
    /// Additive smoothing parameter.
    alpha: f64,
    /// Log prior per class.
    class_log_prior: Vec<f64>,
    /// Log likelihood per class and feature.
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
    fitted: bool,
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new()
    }
}

impl MultinomialNb {
    /// Create a classifier with the default smoothing (alpha = 1.0).
    pub fn new() -> Self {
        MultinomialNb {
            alpha: 1.0,
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
            n_features: 0,
            fitted: false,
        }
    }

    /// Set the additive smoothing parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Number of classes seen at fit time.
    pub fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    fn score_row(&self, x: &FeatureMatrix, row: usize) -> usize {
        let mut best_class = 0;
        let mut best_score = f64::NEG_INFINITY;

        for class in 0..self.n_classes() {
            let mut score = self.class_log_prior[class];
            for &(feature, weight) in x.row(row) {
                if feature < self.n_features {
                    score += weight * self.feature_log_prob[class][feature];
                }
            }
            // Strictly-greater keeps ties on the lower class index.
            if score > best_score {
                best_score = score;
                best_class = class;
            }
        }

        best_class
    }
}

impl Classifier for MultinomialNb {
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
        if self.alpha <= 0.0 {
            return Err(GraymailError::model(format!(
                "smoothing alpha must be positive, got {}",
                self.alpha
            )));
        }

        let n_classes = y.iter().max().copied().unwrap_or(0) + 1;
        let n_features = x.n_columns();
        let n_rows = y.len();

        let mut class_counts = vec![0usize; n_classes];
        let mut feature_counts = vec![vec![0.0f64; n_features]; n_classes];
        let mut class_totals = vec![0.0f64; n_classes];

        for (row, &class) in y.iter().enumerate() {
            class_counts[class] += 1;
            for &(feature, weight) in x.row(row) {
                feature_counts[class][feature] += weight;
                class_totals[class] += weight;
            }
        }

        let class_log_prior = class_counts
            .iter()
            .map(|&count| (count as f64 / n_rows as f64).ln())
            .collect();

        let feature_log_prob = (0..n_classes)
            .map(|class| {
                let denominator = class_totals[class] + self.alpha * n_features as f64;
                feature_counts[class]
                    .iter()
                    .map(|&count| ((count + self.alpha) / denominator).ln())
                    .collect()
            })
            .collect();

        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        self.n_features = n_features;
        self.fitted = true;

        Ok(())
    }

    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<usize>> {
        if !self.fitted {
            return Err(GraymailError::invalid_operation(
                "MultinomialNb::predict called before fit",
            ));
        }

        Ok((0..x.n_rows()).map(|row| self.score_row(x, row)).collect())
    }

    fn name(&self) -> &'static str {
        "multinomial_nb"
    }
}
