//! Evaluation metrics for binary classification.
//!
//! All metrics treat spam (class 1) as the positive class. Undefined
//! ratios follow the zero-division policy: when a denominator is zero the
//! metric is reported as 0.0, never a panic.
//!
//! # Examples
//!
//! ```
//! use graymail::metrics::{accuracy, f1, precision, recall};
//!
//! let y_true = vec![1, 0, 1, 1];
//! let y_pred = vec![1, 0, 0, 1];
//!
//! assert_eq!(accuracy(&y_pred, &y_true), 0.75);
//! assert_eq!(precision(&y_pred, &y_true), 1.0);
//! assert!((recall(&y_pred, &y_true) - 2.0 / 3.0).abs() < 1e-12);
//! assert!(f1(&y_pred, &y_true) > 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// The positive class index (spam).
pub const POSITIVE_CLASS: usize = 1;

/// Confusion counts for the positive class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    /// Positive predicted as positive.
    pub true_positives: usize,
    /// Negative predicted as positive.
    pub false_positives: usize,
    /// Negative predicted as negative.
    pub true_negatives: usize,
    /// Positive predicted as negative.
    pub false_negatives: usize,
}

impl ConfusionCounts {
    /// Count the confusion entries of a prediction run.
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize]) -> Self {
        debug_assert_eq!(y_pred.len(), y_true.len());

        let mut counts = ConfusionCounts::default();
        for (&pred, &truth) in y_pred.iter().zip(y_true.iter()) {
            match (pred == POSITIVE_CLASS, truth == POSITIVE_CLASS) {
                (true, true) => counts.true_positives += 1,
                (true, false) => counts.false_positives += 1,
                (false, false) => counts.true_negatives += 1,
                (false, true) => counts.false_negatives += 1,
            }
        }
        counts
    }

    /// Total number of predictions counted.
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }
}

/// Fraction of correct predictions. Empty input scores 0.0.
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f64 {
    debug_assert_eq!(y_pred.len(), y_true.len());
    if y_true.is_empty() {
        return 0.0;
    }

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / y_true.len() as f64
}

/// precision = TP / (TP + FP), 0.0 when nothing was predicted positive.
pub fn precision(y_pred: &[usize], y_true: &[usize]) -> f64 {
    let counts = ConfusionCounts::from_predictions(y_pred, y_true);
    ratio(counts.true_positives, counts.true_positives + counts.false_positives)
}

/// recall = TP / (TP + FN), 0.0 when no positive rows exist.
pub fn recall(y_pred: &[usize], y_true: &[usize]) -> f64 {
    let counts = ConfusionCounts::from_predictions(y_pred, y_true);
    ratio(counts.true_positives, counts.true_positives + counts.false_negatives)
}

/// F1 = 2PR / (P + R), 0.0 when both precision and recall are zero.
pub fn f1(y_pred: &[usize], y_true: &[usize]) -> f64 {
    let p = precision(y_pred, y_true);
    let r = recall(y_pred, y_true);
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// All four evaluation metrics for one model against one split.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Underlying confusion counts.
    pub confusion: ConfusionCounts,
}

impl MetricsReport {
    /// Compute all metrics from predictions against ground truth.
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize]) -> Self {
        MetricsReport {
            accuracy: accuracy(y_pred, y_true),
            precision: precision(y_pred, y_true),
            recall: recall(y_pred, y_true),
            f1: f1(y_pred, y_true),
            confusion: ConfusionCounts::from_predictions(y_pred, y_true),
        }
    }
}
