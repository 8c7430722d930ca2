//! CSV dataset loader.
//!
//! Reads a delimited file whose header row names, at minimum, a text column
//! and a label column. Column names are located by a small candidate list
//! mirroring common spam-corpus exports, and can be overridden explicitly.
//!
//! ```csv
//! id,text,label
//! 1,Win a free prize now,1
//! 2,Meeting moved to Monday,0
//! ```

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::dataset::{Label, Record};
use crate::error::{GraymailError, Result};

/// Candidate header names for the text column, tried in order.
const TEXT_COLUMN_CANDIDATES: &[&str] = &["text", "content", "message", "body", "Email No."];

/// Candidate header names for the label column, tried in order.
const LABEL_COLUMN_CANDIDATES: &[&str] = &["label", "Prediction", "prediction", "spam", "class"];

/// Candidate header names for the id column, tried in order.
const ID_COLUMN_CANDIDATES: &[&str] = &["id", "no", "Email No."];

/// A loader for CSV spam datasets.
#[derive(Clone, Debug)]
pub struct CsvDatasetLoader {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
    /// Explicit text column name (overrides candidate lookup)
    text_column: Option<String>,
    /// Explicit label column name (overrides candidate lookup)
    label_column: Option<String>,
}

impl Default for CsvDatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetLoader {
    /// Create a new CSV loader with comma delimiter.
    pub fn new() -> Self {
        CsvDatasetLoader {
            delimiter: b',',
            trim: true,
            text_column: None,
            label_column: None,
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set the text column name explicitly.
    pub fn with_text_column<S: Into<String>>(mut self, name: S) -> Self {
        self.text_column = Some(name.into());
        self
    }

    /// Set the label column name explicitly.
    pub fn with_label_column<S: Into<String>>(mut self, name: S) -> Self {
        self.label_column = Some(name.into());
        self
    }

    /// Load all records from the file. All-or-nothing: any malformed row
    /// fails the whole load.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Record>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GraymailError::data(format!(
                "dataset file not found: {}",
                path.display()
            )));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .has_headers(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let text_idx = self.resolve_column(&headers, &self.text_column, TEXT_COLUMN_CANDIDATES)?;
        let label_idx =
            self.resolve_column(&headers, &self.label_column, LABEL_COLUMN_CANDIDATES)?;
        let id_idx = find_candidate(&headers, ID_COLUMN_CANDIDATES)
            .filter(|&idx| idx != text_idx && idx != label_idx);

        let mut records = Vec::new();
        for (row_number, result) in reader.records().enumerate() {
            let row = result?;
            records.push(self.parse_row(&row, row_number, text_idx, label_idx, id_idx)?);
        }

        Ok(records)
    }

    /// Resolve a logical column to a header index, preferring an explicit
    /// override over the candidate list.
    fn resolve_column(
        &self,
        headers: &StringRecord,
        explicit: &Option<String>,
        candidates: &[&str],
    ) -> Result<usize> {
        if let Some(name) = explicit {
            return headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| {
                    GraymailError::data(format!(
                        "column {name:?} not found in header: {headers:?}"
                    ))
                });
        }

        find_candidate(headers, candidates).ok_or_else(|| {
            GraymailError::data(format!(
                "no column matching {candidates:?} in header: {headers:?}"
            ))
        })
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        row_number: usize,
        text_idx: usize,
        label_idx: usize,
        id_idx: Option<usize>,
    ) -> Result<Record> {
        let text = row.get(text_idx).ok_or_else(|| {
            GraymailError::data(format!("row {row_number}: missing text field"))
        })?;

        // A missing or unparseable label is recoverable: the row is kept
        // and filtered out before training.
        let label = row.get(label_idx).and_then(Label::parse);

        let id = id_idx
            .and_then(|idx| row.get(idx))
            .map(str::to_string)
            .unwrap_or_else(|| row_number.to_string());

        Ok(Record {
            id,
            text: text.to_string(),
            label,
        })
    }
}

fn find_candidate(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|header| header == *candidate))
}
