//! Exhaustive grid search over random forest hyperparameters.
//!
//! Candidates are enumerated in a fixed nested order, so with equal
//! cross-validation scores the earliest candidate wins and a given seed
//! always selects the same parameters.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::{ForestParams, RandomForestClassifier};
use crate::error::{GraymailError, Result};
use crate::model_selection::{KFold, cross_validate};
use crate::vectorize::FeatureMatrix;

/// Candidate values for each forest hyperparameter.
///
/// The search space is the Cartesian product of the four lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParamGrid {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<Option<usize>>,
    pub min_samples_split: Vec<usize>,
    pub min_samples_leaf: Vec<usize>,
}

impl Default for ForestParamGrid {
    fn default() -> Self {
        ForestParamGrid {
            n_estimators: vec![100, 200, 500],
            max_depth: vec![None, Some(5), Some(10)],
            min_samples_split: vec![2, 5, 10],
            min_samples_leaf: vec![1, 2, 4],
        }
    }
}

impl ForestParamGrid {
    /// A one-point grid holding only the default forest parameters.
    ///
    /// Used by the `--quick` mode to skip the full search while keeping
    /// the pipeline shape unchanged.
    pub fn single(params: ForestParams) -> Self {
        ForestParamGrid {
            n_estimators: vec![params.n_estimators],
            max_depth: vec![params.max_depth],
            min_samples_split: vec![params.min_samples_split],
            min_samples_leaf: vec![params.min_samples_leaf],
        }
    }

    /// Number of candidates in the grid.
    pub fn len(&self) -> usize {
        self.n_estimators.len()
            * self.max_depth.len()
            * self.min_samples_split.len()
            * self.min_samples_leaf.len()
    }

    /// Whether any dimension is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enumerate every candidate in fixed nested order: `n_estimators`
    /// outermost, `min_samples_leaf` innermost.
    pub fn candidates(&self) -> Vec<ForestParams> {
        let mut out = Vec::with_capacity(self.len());
        for &n_estimators in &self.n_estimators {
            for &max_depth in &self.max_depth {
                for &min_samples_split in &self.min_samples_split {
                    for &min_samples_leaf in &self.min_samples_leaf {
                        out.push(ForestParams {
                            n_estimators,
                            max_depth,
                            min_samples_split,
                            min_samples_leaf,
                        });
                    }
                }
            }
        }
        out
    }
}

/// Winning candidate of a grid search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSearchResult {
    pub best_params: ForestParams,
    /// Mean k-fold validation accuracy of the winner.
    pub best_score: f64,
    /// Number of candidates evaluated.
    pub n_candidates: usize,
}

/// Exhaustive search scored by mean k-fold accuracy.
#[derive(Clone, Debug)]
pub struct GridSearch {
    grid: ForestParamGrid,
    folds: KFold,
    seed: u64,
}

impl GridSearch {
    /// Create a search over `grid` scored with `cv_folds`-fold
    /// cross-validation. `seed` drives both fold shuffling and every
    /// candidate forest.
    pub fn new(grid: ForestParamGrid, cv_folds: usize, seed: u64) -> Self {
        GridSearch {
            grid,
            folds: KFold::new(cv_folds).with_random_state(seed),
            seed,
        }
    }

    /// Evaluate every candidate and return the best one.
    ///
    /// Ties keep the earliest candidate in enumeration order. An empty
    /// grid degrades to the single default candidate instead of failing.
    pub fn run(&self, x: &FeatureMatrix, y: &[usize]) -> Result<GridSearchResult> {
        let candidates = if self.grid.is_empty() {
            vec![ForestParams::default()]
        } else {
            self.grid.candidates()
        };

        // Scores come back in enumeration order, so the strictly-greater
        // selection below keeps ties on the earliest candidate.
        let scored: Vec<(ForestParams, f64)> = candidates
            .par_iter()
            .map(|params| {
                let model = RandomForestClassifier::new(params.clone(), self.seed);
                cross_validate(&model, x, y, &self.folds).map(|score| (params.clone(), score))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut best: Option<(ForestParams, f64)> = None;
        for (params, score) in scored {
            if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                best = Some((params, score));
            }
        }

        // `candidates` always holds at least one entry.
        let (best_params, best_score) = best.ok_or_else(|| {
            GraymailError::invalid_operation("grid search produced no candidates")
        })?;

        Ok(GridSearchResult {
            best_params,
            best_score,
            n_candidates: candidates.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorize::TfIdfVectorizer;

    fn fixture() -> (FeatureMatrix, Vec<usize>) {
        let corpus: Vec<String> = [
            "free money prize",
            "win free cash",
            "claim prize money",
            "free cash offer",
            "win money claim",
            "meeting agenda monday",
            "project deadline report",
            "lunch tomorrow noon",
            "agenda project notes",
            "report deadline monday",
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();
        let y = vec![1, 1, 1, 1, 1, 0, 0, 0, 0, 0];

        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&corpus).unwrap();
        let x = vectorizer.transform(&corpus).unwrap();
        (x, y)
    }

    #[test]
    fn test_default_grid_size() {
        let grid = ForestParamGrid::default();
        assert_eq!(grid.len(), 81);
        assert_eq!(grid.candidates().len(), 81);
    }

    #[test]
    fn test_candidates_enumeration_order() {
        let grid = ForestParamGrid {
            n_estimators: vec![10, 20],
            max_depth: vec![None, Some(3)],
            min_samples_split: vec![2],
            min_samples_leaf: vec![1],
        };

        let candidates = grid.candidates();
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].n_estimators, 10);
        assert_eq!(candidates[0].max_depth, None);
        assert_eq!(candidates[1].n_estimators, 10);
        assert_eq!(candidates[1].max_depth, Some(3));
        assert_eq!(candidates[2].n_estimators, 20);
    }

    #[test]
    fn test_empty_grid_falls_back_to_defaults() {
        let grid = ForestParamGrid {
            n_estimators: vec![],
            max_depth: vec![None],
            min_samples_split: vec![2],
            min_samples_leaf: vec![1],
        };
        assert!(grid.is_empty());

        let (x, y) = fixture();
        let result = GridSearch::new(grid, 2, 42).run(&x, &y).unwrap();
        assert_eq!(result.best_params, ForestParams::default());
        assert_eq!(result.n_candidates, 1);
    }

    #[test]
    fn test_single_candidate_search() {
        let (x, y) = fixture();

        let params = ForestParams {
            n_estimators: 10,
            ..ForestParams::default()
        };
        let search = GridSearch::new(ForestParamGrid::single(params.clone()), 2, 42);
        let result = search.run(&x, &y).unwrap();

        assert_eq!(result.best_params, params);
        assert_eq!(result.n_candidates, 1);
        assert!((0.0..=1.0).contains(&result.best_score));
    }

    #[test]
    fn test_search_is_deterministic() {
        let (x, y) = fixture();

        let grid = ForestParamGrid {
            n_estimators: vec![5, 10],
            max_depth: vec![None, Some(3)],
            min_samples_split: vec![2],
            min_samples_leaf: vec![1],
        };

        let a = GridSearch::new(grid.clone(), 2, 42).run(&x, &y).unwrap();
        let b = GridSearch::new(grid, 2, 42).run(&x, &y).unwrap();
        assert_eq!(a, b);
    }
}
