//! Lowercase filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts all token text to lowercase.
///
/// Runs first in the email analysis chain so that the stop filter and the
/// stemmer only ever see lowercase input.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let lowered: Vec<Token> = tokens
            .map(|mut token| {
                token.text = token.text.to_lowercase();
                token
            })
            .collect();

        Ok(Box::new(lowered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
