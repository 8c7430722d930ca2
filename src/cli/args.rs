//! Command line argument parsing for the graymail CLI using clap.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Graymail - spam email classification experiments
#[derive(Parser, Debug, Clone)]
#[command(name = "graymail")]
#[command(about = "Train and compare spam email classifiers on a labeled CSV dataset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GraymailArgs {
    /// Path to the dataset CSV file
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Fraction of labeled rows held out for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_size: f64,

    /// Seed for the split, fold shuffling and the forests
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of cross-validation folds for the grid search
    #[arg(long, default_value = "5")]
    pub cv_folds: usize,

    /// Additive smoothing for the Naive Bayes baseline
    #[arg(long, default_value = "1.0")]
    pub nb_alpha: f64,

    /// Skip the grid search and train one default forest
    #[arg(long)]
    pub quick: bool,

    /// Name of the column holding the email text (auto-detected by default)
    #[arg(long, value_name = "COLUMN")]
    pub text_column: Option<String>,

    /// Name of the column holding the label (auto-detected by default)
    #[arg(long, value_name = "COLUMN")]
    pub label_column: Option<String>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl GraymailArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = GraymailArgs::parse_from(["graymail", "emails.csv"]);
        assert_eq!(args.dataset, PathBuf::from("emails.csv"));
        assert_eq!(args.test_size, 0.2);
        assert_eq!(args.seed, 42);
        assert_eq!(args.cv_folds, 5);
        assert!(!args.quick);
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_overrides() {
        let args = GraymailArgs::parse_from([
            "graymail",
            "data.csv",
            "--test-size",
            "0.3",
            "--seed",
            "7",
            "--cv-folds",
            "3",
            "--quick",
            "--format",
            "json",
            "--pretty",
        ]);
        assert_eq!(args.test_size, 0.3);
        assert_eq!(args.seed, 7);
        assert_eq!(args.cv_folds, 3);
        assert!(args.quick);
        assert!(args.pretty);
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = GraymailArgs::parse_from(["graymail", "data.csv", "-v", "-v", "-q"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_multiple_verbose_flags() {
        let args = GraymailArgs::parse_from(["graymail", "data.csv", "-vv"]);
        assert_eq!(args.verbosity(), 2);
    }

    #[test]
    fn test_column_overrides() {
        let args = GraymailArgs::parse_from([
            "graymail",
            "data.csv",
            "--text-column",
            "body",
            "--label-column",
            "spam",
        ]);
        assert_eq!(args.text_column.as_deref(), Some("body"));
        assert_eq!(args.label_column.as_deref(), Some("spam"));
    }
}
