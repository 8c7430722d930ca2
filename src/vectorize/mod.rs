//! TF-IDF feature extraction.
//!
//! [`TfIdfVectorizer`] learns a vocabulary and smoothed inverse document
//! frequencies from the training partition, then maps any batch of
//! normalized texts onto a [`FeatureMatrix`] with a fixed column count.
//! Out-of-vocabulary terms at transform time contribute zero weight and
//! never fail.
//!
//! The vectorizer consumes *normalized* text (see [`crate::analysis`]):
//! terms are whitespace-separated and already lowercased and stemmed.

use std::collections::{HashMap, HashSet};

use crate::error::{GraymailError, Result};

/// A sparse matrix of TF-IDF weights, one row per document.
///
/// Each row stores `(column, weight)` pairs sorted by column index. The
/// column count is fixed by the vocabulary that produced the matrix, so
/// matrices transformed by the same fitted vectorizer are always
/// dimensionally compatible.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<(usize, f64)>>,
    n_columns: usize,
}

impl FeatureMatrix {
    /// Build a matrix from sparse rows. Rows must be sorted by column.
    pub fn from_rows(rows: Vec<Vec<(usize, f64)>>, n_columns: usize) -> Self {
        FeatureMatrix { rows, n_columns }
    }

    /// Number of rows (documents).
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (vocabulary size).
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// The sparse entries of row `i`, sorted by column.
    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i]
    }

    /// The weight at (`row`, `column`), zero when absent.
    pub fn value(&self, row: usize, column: usize) -> f64 {
        match self.rows[row].binary_search_by_key(&column, |&(col, _)| col) {
            Ok(pos) => self.rows[row][pos].1,
            Err(_) => 0.0,
        }
    }

    /// A new matrix containing the given rows, in the given order.
    ///
    /// Row/label pairing is the caller's responsibility: apply the same
    /// index order to the label vector.
    pub fn select_rows(&self, indices: &[usize]) -> FeatureMatrix {
        FeatureMatrix {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            n_columns: self.n_columns,
        }
    }
}

/// TF-IDF vectorizer with a training-set-fixed vocabulary.
#[derive(Clone, Default)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column index, in first-seen order.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f64>,
    /// Number of documents seen at fit time.
    n_documents: usize,
    fitted: bool,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("fitted", &self.fitted)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new, unfitted vectorizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary and IDF weights from training documents.
    ///
    /// Must be called exactly once; a second fit is an invalid operation
    /// because it would silently change the feature space under any
    /// already-transformed matrix.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if self.fitted {
            return Err(GraymailError::invalid_operation(
                "TfIdfVectorizer::fit called twice; create a new vectorizer instead",
            ));
        }

        self.n_documents = documents.len();
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        // Walk terms in document order so column indices follow true
        // first-seen order and two fits on the same corpus always agree.
        for doc in documents {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in doc.split_whitespace() {
                if seen.insert(term) {
                    *document_frequency.entry(term.to_string()).or_insert(0) += 1;
                }
                if !vocabulary.contains_key(term) {
                    let idx = vocabulary.len();
                    vocabulary.insert(term.to_string(), idx);
                }
            }
        }

        // Smoothed IDF: ln((1 + N) / (1 + df)) + 1. Smoothing keeps terms
        // that appear in every document at a positive weight.
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = document_frequency.get(term).copied().unwrap_or(0);
            idf[idx] = ((1.0 + self.n_documents as f64) / (1.0 + df as f64)).ln() + 1.0;
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.fitted = true;

        Ok(())
    }

    /// Transform documents into a feature matrix using the fitted
    /// vocabulary. Unknown terms are ignored.
    pub fn transform(&self, documents: &[String]) -> Result<FeatureMatrix> {
        if !self.fitted {
            return Err(GraymailError::invalid_operation(
                "TfIdfVectorizer::transform called before fit",
            ));
        }

        let rows = documents
            .iter()
            .map(|doc| self.transform_one(doc))
            .collect();

        Ok(FeatureMatrix::from_rows(rows, self.vocabulary.len()))
    }

    fn transform_one(&self, document: &str) -> Vec<(usize, f64)> {
        let mut term_counts: HashMap<usize, f64> = HashMap::new();
        for term in document.split_whitespace() {
            if let Some(&idx) = self.vocabulary.get(term) {
                *term_counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: Vec<(usize, f64)> = term_counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        row.sort_unstable_by_key(|&(idx, _)| idx);

        // L2 row normalization, matching the conventional TF-IDF setup.
        let norm: f64 = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut row {
                *weight /= norm;
            }
        }

        row
    }

    /// Whether `fit` has been called.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Get the size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Get the column index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}
