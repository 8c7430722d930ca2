//! Token types produced and consumed by the analysis pipeline.

/// A single token extracted from a text body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token text.
    pub text: String,
    /// Zero-based position of the token in the source text.
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }
}

/// A boxed iterator of tokens, passed between pipeline stages.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
