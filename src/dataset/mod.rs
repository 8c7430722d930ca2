//! Dataset types and CSV loading.
//!
//! A dataset is an ordered sequence of [`Record`]s read from a delimited
//! file. Loading is all-or-nothing: a missing file or a malformed row
//! aborts with a data error. A missing or unparseable *label* is not a row
//! error; such rows load with `label: None` and are excluded from training
//! by the pipeline.

pub mod loader;

pub use loader::CsvDatasetLoader;

use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::error::Result;

/// Binary classification label for an email.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Legitimate email (0).
    Ham,
    /// Spam email (1).
    Spam,
}

impl Label {
    /// The class index used by classifiers: ham = 0, spam = 1.
    pub fn index(&self) -> usize {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }

    /// Parse a label cell. Accepts `0`/`1` and the words `ham`/`spam`
    /// (case-insensitive). Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Label> {
        match value.trim() {
            "0" => Some(Label::Ham),
            "1" => Some(Label::Spam),
            other if other.eq_ignore_ascii_case("ham") => Some(Label::Ham),
            other if other.eq_ignore_ascii_case("spam") => Some(Label::Spam),
            _ => None,
        }
    }

    /// Display name for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }
}

/// A single email record as loaded from the dataset file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    /// Row identifier (taken from the id column, or the row number).
    pub id: String,
    /// Raw email text.
    pub text: String,
    /// Binary label; `None` when the label cell was missing or invalid.
    pub label: Option<Label>,
}

/// A record plus its analyzer-normalized text.
///
/// Derived deterministically from the record; recomputed whenever the
/// analyzer configuration changes.
#[derive(Clone, Debug)]
pub struct ProcessedRecord {
    /// The source record.
    pub record: Record,
    /// Lowercased, stop-word-free, stemmed text joined by single spaces.
    pub normalized_text: String,
}

impl ProcessedRecord {
    /// Preprocess a record with the given analyzer.
    pub fn from_record(record: Record, analyzer: &dyn Analyzer) -> Result<ProcessedRecord> {
        let normalized_text = analyzer.normalize(&record.text)?;
        Ok(ProcessedRecord {
            record,
            normalized_text,
        })
    }
}

/// Preprocess a whole dataset in order.
pub fn preprocess(records: Vec<Record>, analyzer: &dyn Analyzer) -> Result<Vec<ProcessedRecord>> {
    records
        .into_iter()
        .map(|record| ProcessedRecord::from_record(record, analyzer))
        .collect()
}

/// Counts of each label value in a dataset, for the distribution report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDistribution {
    /// Rows labeled ham.
    pub ham: usize,
    /// Rows labeled spam.
    pub spam: usize,
    /// Rows with a missing or invalid label.
    pub unlabeled: usize,
}

impl LabelDistribution {
    /// Total number of rows counted.
    pub fn total(&self) -> usize {
        self.ham + self.spam + self.unlabeled
    }

    /// Number of rows usable for training and evaluation.
    pub fn labeled(&self) -> usize {
        self.ham + self.spam
    }
}

/// Count the label distribution of a dataset.
pub fn label_distribution(records: &[Record]) -> LabelDistribution {
    let mut distribution = LabelDistribution::default();
    for record in records {
        match record.label {
            Some(Label::Ham) => distribution.ham += 1,
            Some(Label::Spam) => distribution.spam += 1,
            None => distribution.unlabeled += 1,
        }
    }
    distribution
}
