//! Text analysis pipeline: tokenization, filtering and normalization.
//!
//! Raw email text passes through a tokenizer and a chain of token filters
//! (lowercase, stop-word removal, stemming) before it reaches the feature
//! extractor. The chain is assembled by an [`analyzer::Analyzer`]; the
//! standard configuration for English email text is
//! [`analyzer::EnglishAnalyzer`].

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, EnglishAnalyzer, PipelineAnalyzer};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LowercaseFilter, PorterStemmer, StemFilter, Stemmer, StopFilter};
pub use tokenizer::{Tokenizer, UnicodeWordTokenizer};
