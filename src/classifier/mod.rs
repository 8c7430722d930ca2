//! Classification models.
//!
//! Both models implement the [`Classifier`] trait over a TF-IDF
//! [`FeatureMatrix`](crate::vectorize::FeatureMatrix): the multinomial
//! Naive Bayes baseline and the bootstrap-aggregated random forest used by
//! the tuned pipeline stage. Models own their learned parameters and are
//! immutable after fit except through refitting.

pub mod forest;
pub mod nb;
pub mod tree;

pub use forest::{ForestParams, RandomForestClassifier};
pub use nb::MultinomialNb;
pub use tree::DecisionTreeClassifier;

use crate::error::Result;
use crate::vectorize::FeatureMatrix;

/// Trait for trainable classifiers.
pub trait Classifier: Send + Sync {
    /// Fit the model on a feature matrix and class labels.
    ///
    /// `y[i]` is the class index of row `i`; the slices must be the same
    /// length and pairing must match the matrix row order.
    fn fit(&mut self, x: &FeatureMatrix, y: &[usize]) -> Result<()>;

    /// Predict a class index for every row of the matrix.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<usize>>;

    /// Get the name of this classifier (for reports).
    fn name(&self) -> &'static str;
}

/// Majority class of a label slice; ties break toward the lower class
/// index for determinism.
pub(crate) fn majority_class(labels: impl Iterator<Item = usize>, n_classes: usize) -> usize {
    let mut counts = vec![0usize; n_classes];
    for label in labels {
        counts[label] += 1;
    }

    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_class() {
        assert_eq!(majority_class([0, 1, 1].into_iter(), 2), 1);
        assert_eq!(majority_class([0, 0, 1].into_iter(), 2), 0);
    }

    #[test]
    fn test_majority_class_tie_breaks_low() {
        assert_eq!(majority_class([0, 1].into_iter(), 2), 0);
        assert_eq!(majority_class([1, 0, 1, 0].into_iter(), 2), 0);
    }
}
