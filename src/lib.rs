//! # Graymail
//!
//! Supervised spam email classification in pure Rust.
//!
//! ## Pipeline
//!
//! - CSV dataset loading with header auto-detection
//! - Text normalization (tokenize, lowercase, stop words, stemming)
//! - TF-IDF feature extraction over the training vocabulary
//! - Multinomial Naive Bayes baseline
//! - Grid-searched random forest with k-fold cross-validation
//! - Comparative metrics report

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod vectorize;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
