//! The end-to-end classification experiment.
//!
//! Runs the five pipeline stages in order: label distribution, text
//! normalization, train/test split, TF-IDF vectorization, then the two
//! models (Naive Bayes baseline and grid-searched random forest) scored
//! against the same held-out split.
//!
//! The split happens *before* the vectorizer is fitted, so the
//! vocabulary and IDF weights come from the training partition only and
//! test rows never leak into feature extraction.

use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::classifier::{Classifier, ForestParams, MultinomialNb, RandomForestClassifier};
use crate::dataset::{LabelDistribution, Record, label_distribution, preprocess};
use crate::error::{GraymailError, Result};
use crate::metrics::MetricsReport;
use crate::model_selection::{ForestParamGrid, GridSearch, train_test_split};
use crate::vectorize::TfIdfVectorizer;

/// Configuration of one experiment run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Fraction of labeled rows held out for evaluation.
    pub test_size: f64,
    /// Seed for the split, fold shuffling and every forest.
    pub seed: u64,
    /// Folds used by the grid search.
    pub cv_folds: usize,
    /// Additive smoothing for the Naive Bayes baseline.
    pub nb_alpha: f64,
    /// Hyperparameter grid for the random forest.
    pub grid: ForestParamGrid,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            test_size: 0.2,
            seed: 42,
            cv_folds: 5,
            nb_alpha: 1.0,
            grid: ForestParamGrid::default(),
        }
    }
}

/// Which model won on held-out accuracy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    TunedImproved,
    BaselineHeld,
    Tie,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Verdict::TunedImproved => "the tuned random forest outperformed the baseline",
            Verdict::BaselineHeld => "the Naive Bayes baseline held its lead",
            Verdict::Tie => "both models scored the same held-out accuracy",
        };
        write!(f, "{text}")
    }
}

/// One model's metrics on the held-out split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelEvaluation {
    pub model: String,
    pub metrics: MetricsReport,
}

/// Everything a run produces, ready for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    pub distribution: LabelDistribution,
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
    pub baseline: ModelEvaluation,
    pub tuned: ModelEvaluation,
    pub best_params: ForestParams,
    /// Mean cross-validation accuracy of the winning candidate.
    pub best_cv_score: f64,
    pub n_candidates: usize,
    pub verdict: Verdict,
}

/// Run the full experiment on a loaded dataset.
///
/// Rows without a valid label are counted in the distribution but
/// excluded from training and evaluation.
pub fn run_experiment(
    records: Vec<Record>,
    analyzer: &dyn Analyzer,
    config: &ExperimentConfig,
) -> Result<ExperimentReport> {
    let distribution = label_distribution(&records);
    if distribution.ham == 0 || distribution.spam == 0 {
        return Err(GraymailError::label(format!(
            "both classes are required for training, found {} ham and {} spam rows",
            distribution.ham, distribution.spam
        )));
    }

    let processed = preprocess(records, analyzer)?;

    let mut texts = Vec::with_capacity(distribution.labeled());
    let mut labels = Vec::with_capacity(distribution.labeled());
    for item in &processed {
        if let Some(label) = item.record.label {
            texts.push(item.normalized_text.clone());
            labels.push(label.index());
        }
    }

    let split = train_test_split(labels.len(), config.test_size, config.seed)?;
    let (train_texts, test_texts) = split.split_values(&texts);
    let (y_train, y_test) = split.split_labels(&labels);

    // Vocabulary and IDF come from the training partition only.
    let mut vectorizer = TfIdfVectorizer::new();
    vectorizer.fit(&train_texts)?;
    let x_train = vectorizer.transform(&train_texts)?;
    let x_test = vectorizer.transform(&test_texts)?;

    let mut baseline_model = MultinomialNb::new().with_alpha(config.nb_alpha);
    baseline_model.fit(&x_train, &y_train)?;
    let baseline_predictions = baseline_model.predict(&x_test)?;
    let baseline = ModelEvaluation {
        model: baseline_model.name().to_string(),
        metrics: MetricsReport::from_predictions(&baseline_predictions, &y_test),
    };

    let search = GridSearch::new(config.grid.clone(), config.cv_folds, config.seed);
    let search_result = search.run(&x_train, &y_train)?;

    // Refit the winner on the full training partition.
    let mut forest = RandomForestClassifier::new(search_result.best_params.clone(), config.seed);
    forest.fit(&x_train, &y_train)?;
    let tuned_predictions = forest.predict(&x_test)?;
    let tuned = ModelEvaluation {
        model: forest.name().to_string(),
        metrics: MetricsReport::from_predictions(&tuned_predictions, &y_test),
    };

    let verdict = if tuned.metrics.accuracy > baseline.metrics.accuracy {
        Verdict::TunedImproved
    } else if tuned.metrics.accuracy < baseline.metrics.accuracy {
        Verdict::BaselineHeld
    } else {
        Verdict::Tie
    };

    Ok(ExperimentReport {
        config: config.clone(),
        distribution,
        n_train: y_train.len(),
        n_test: y_test.len(),
        vocabulary_size: vectorizer.vocabulary_size(),
        baseline,
        tuned,
        best_params: search_result.best_params,
        best_cv_score: search_result.best_score,
        n_candidates: search_result.n_candidates,
        verdict,
    })
}
