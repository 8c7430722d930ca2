//! Analyzers that combine a tokenizer with a chain of token filters.
//!
//! The pipeline applies processing in this order:
//! 1. Tokenizer: splits raw text into tokens
//! 2. Token filters: applied sequentially in the order they were added
//!
//! [`EnglishAnalyzer`] is the preconfigured chain used for email
//! preprocessing: Unicode word tokenizer, lowercase, stop-word removal,
//! Porter stemming.
//!
//! # Examples
//!
//! ```
//! use graymail::analysis::analyzer::{Analyzer, EnglishAnalyzer};
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! let normalized = analyzer.normalize("The WINNING ticket is waiting!").unwrap();
//!
//! assert_eq!(normalized, "win ticket wait");
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, LowercaseFilter, StemFilter, StopFilter};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// Trait for analyzers that turn raw text into a token stream.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text into a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Analyze text and rejoin the surviving token texts with single spaces.
    ///
    /// This is the normalized-text form consumed by the vectorizer. Text
    /// that loses every token to filtering yields an empty string, not an
    /// error.
    fn normalize(&self, text: &str) -> Result<String> {
        let tokens: Vec<String> = self.analyze(text)?.map(|token| token.text).collect();
        Ok(tokens.join(" "))
    }
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the number of filters in the pipeline.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The standard English analysis chain for email text.
///
/// Tokenizes on Unicode word boundaries, lowercases, removes English stop
/// words and applies the Porter stemmer. A pure function of its input: no
/// state is carried between calls.
pub struct EnglishAnalyzer {
    pipeline: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    /// Create a new English analyzer with the default stop-word set.
    pub fn new() -> Result<Self> {
        let pipeline = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(StemFilter::new()))
            .with_name("english");
        Ok(EnglishAnalyzer { pipeline })
    }

    /// Create an English analyzer with a custom stop-word list.
    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pipeline = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(words)))
            .add_filter(Arc::new(StemFilter::new()))
            .with_name("english");
        Ok(EnglishAnalyzer { pipeline })
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &str {
        "english"
    }
}
