//! Train/test splitting and cross-validation.
//!
//! Splits are index-based: callers hold one feature matrix and one label
//! vector, and apply the same index lists to both so row/label pairing
//! is preserved. All shuffling is driven by a caller-supplied seed.

pub mod grid;

pub use grid::{ForestParamGrid, GridSearch, GridSearchResult};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::classifier::Classifier;
use crate::error::{GraymailError, Result};
use crate::metrics::accuracy;
use crate::vectorize::FeatureMatrix;

/// Disjoint train/test index lists covering `0..n_rows`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    /// Apply the split to a label vector, returning (train, test) labels.
    pub fn split_labels(&self, labels: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let train = self.train_indices.iter().map(|&i| labels[i]).collect();
        let test = self.test_indices.iter().map(|&i| labels[i]).collect();
        (train, test)
    }

    /// Apply the split to a slice of values by cloning the selected items.
    pub fn split_values<T: Clone>(&self, values: &[T]) -> (Vec<T>, Vec<T>) {
        let train = self.train_indices.iter().map(|&i| values[i].clone()).collect();
        let test = self.test_indices.iter().map(|&i| values[i].clone()).collect();
        (train, test)
    }
}

/// Shuffle `0..n_rows` with a seeded generator and split off a test
/// fraction of `round(n_rows * test_size)` rows.
pub fn train_test_split(n_rows: usize, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_size) || test_size <= 0.0 {
        return Err(GraymailError::config(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }
    if n_rows < 2 {
        return Err(GraymailError::data(format!(
            "need at least 2 rows to split, got {n_rows}"
        )));
    }

    let n_test = ((n_rows as f64 * test_size).round() as usize).clamp(1, n_rows - 1);

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_indices = indices.split_off(n_rows - n_test);
    Ok(TrainTestSplit {
        train_indices: indices,
        test_indices,
    })
}

/// K-fold splitter.
///
/// Folds are consecutive index ranges of near-equal size; the remainder
/// of `n / k` is spread over the leading folds. With a random state set,
/// indices are shuffled once before folding.
#[derive(Clone, Debug)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    random_state: u64,
}

impl KFold {
    /// Create a splitter with `n_splits` folds, no shuffling.
    pub fn new(n_splits: usize) -> Self {
        KFold {
            n_splits,
            shuffle: false,
            random_state: 0,
        }
    }

    /// Enable or disable shuffling before folding.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the shuffle seed (implies shuffling).
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self.shuffle = true;
        self
    }

    /// Number of folds.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Produce `(train_indices, validation_indices)` for every fold.
    pub fn split(&self, n_rows: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(GraymailError::config(format!(
                "k-fold needs at least 2 splits, got {}",
                self.n_splits
            )));
        }
        if n_rows < self.n_splits {
            return Err(GraymailError::data(format!(
                "cannot make {} folds from {} rows",
                self.n_splits, n_rows
            )));
        }

        let mut indices: Vec<usize> = (0..n_rows).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.random_state);
            indices.shuffle(&mut rng);
        }

        let base = n_rows / self.n_splits;
        let remainder = n_rows % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < remainder);
            let validation: Vec<usize> = indices[start..start + size].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[start + size..].iter())
                .copied()
                .collect();
            folds.push((train, validation));
            start += size;
        }

        Ok(folds)
    }
}

/// Mean validation accuracy of a classifier over k folds.
///
/// Each fold clones the unfitted model, fits it on the fold's training
/// rows, and scores accuracy on the held-out rows.
pub fn cross_validate<C>(
    model: &C,
    x: &FeatureMatrix,
    y: &[usize],
    folds: &KFold,
) -> Result<f64>
where
    C: Classifier + Clone,
{
    if x.n_rows() != y.len() {
        return Err(GraymailError::model(format!(
            "feature matrix has {} rows but {} labels were given",
            x.n_rows(),
            y.len()
        )));
    }

    let splits = folds.split(y.len())?;
    let mut scores = Vec::with_capacity(splits.len());

    for (train_indices, validation_indices) in &splits {
        let x_train = x.select_rows(train_indices);
        let y_train: Vec<usize> = train_indices.iter().map(|&i| y[i]).collect();
        let x_validation = x.select_rows(validation_indices);
        let y_validation: Vec<usize> = validation_indices.iter().map(|&i| y[i]).collect();

        let mut fold_model = model.clone();
        fold_model.fit(&x_train, &y_train)?;
        let predictions = fold_model.predict(&x_validation)?;
        scores.push(accuracy(&predictions, &y_validation));
    }

    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}
