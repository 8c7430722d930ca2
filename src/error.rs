//! Error types for the Graymail library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`GraymailError`] enum. Recoverable conditions (rows with a missing
//! label, tied or empty grid candidates) are handled inside the pipeline
//! and never surface here; everything that does surface aborts the run.
//!
//! # Examples
//!
//! ```
//! use graymail::error::{GraymailError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GraymailError::data("label column not found"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Graymail operations.
#[derive(Error, Debug)]
pub enum GraymailError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dataset errors (missing file, malformed schema or row)
    #[error("Data error: {0}")]
    Data(String),

    /// Label errors (label sets unusable for training, e.g. one class)
    #[error("Label error: {0}")]
    Label(String),

    /// Configuration errors (invalid split ratio or fold count)
    #[error("Config error: {0}")]
    Config(String),

    /// Model errors (training or prediction failures)
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid operation (e.g. transform before fit)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with GraymailError.
pub type Result<T> = std::result::Result<T, GraymailError>;

impl GraymailError {
    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        GraymailError::Data(msg.into())
    }

    /// Create a new label error.
    pub fn label<S: Into<String>>(msg: S) -> Self {
        GraymailError::Label(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        GraymailError::Config(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        GraymailError::Model(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        GraymailError::InvalidOperation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = GraymailError::data("missing label column");
        assert_eq!(error.to_string(), "Data error: missing label column");

        let error = GraymailError::config("empty grid");
        assert_eq!(error.to_string(), "Config error: empty grid");

        let error = GraymailError::invalid_operation("transform before fit");
        assert_eq!(error.to_string(), "Invalid operation: transform before fit");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let graymail_error = GraymailError::from(io_error);

        match graymail_error {
            GraymailError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
