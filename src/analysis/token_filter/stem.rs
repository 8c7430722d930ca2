//! Stemming filter and the Porter stemming algorithm.
//!
//! The Porter stemmer reduces English words to their stems by rule-based
//! suffix stripping, applied in five steps (plural/participle removal,
//! then progressively aggressive suffix rewrites, then final -e/-ll
//! cleanup). Stemming is deterministic: the same input always produces the
//! same stem, which keeps preprocessing reproducible across runs.
//!
//! # Examples
//!
//! ```
//! use graymail::analysis::token_filter::{PorterStemmer, Stemmer};
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Trait for stemmers that reduce words to a root form.
pub trait Stemmer: Send + Sync {
    /// Stem a single word.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Check whether the byte at `pos` is a vowel.
///
/// `y` counts as a vowel when it follows a consonant.
fn is_vowel(word: &[u8], pos: usize) -> bool {
    match word[pos] {
        b'a' | b'e' | b'i' | b'o' | b'u' => true,
        b'y' if pos > 0 => !is_vowel(word, pos - 1),
        _ => false,
    }
}

/// The Porter measure: the number of vowel-consonant sequences in the word.
fn measure(word: &str) -> usize {
    let bytes = word.as_bytes();
    let n = bytes.len();
    let mut m = 0;
    let mut i = 0;

    while i < n && !is_vowel(bytes, i) {
        i += 1;
    }

    while i < n {
        while i < n && is_vowel(bytes, i) {
            i += 1;
        }
        if i >= n {
            break;
        }
        m += 1;
        while i < n && !is_vowel(bytes, i) {
            i += 1;
        }
    }

    m
}

fn contains_vowel(word: &str) -> bool {
    let bytes = word.as_bytes();
    (0..bytes.len()).any(|i| is_vowel(bytes, i))
}

fn ends_with_double_consonant(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes, n - 1)
}

/// Consonant-vowel-consonant ending, where the final consonant is not
/// `w`, `x` or `y`.
fn ends_cvc(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 3
        && !is_vowel(bytes, n - 3)
        && is_vowel(bytes, n - 2)
        && !is_vowel(bytes, n - 1)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}

/// Replace `old` with `new` when the remaining stem has measure >= `min_m`.
fn replace_suffix(word: &str, old: &str, new: &str, min_m: usize) -> String {
    if let Some(stem) = word.strip_suffix(old) {
        if measure(stem) >= min_m {
            return format!("{stem}{new}");
        }
    }
    word.to_string()
}

/// Step 1a: plural removal (-sses, -ies, -ss, -s).
fn step1a(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("sses") {
        format!("{stem}ss")
    } else if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}i")
    } else if word.ends_with("ss") {
        word.to_string()
    } else if word.len() > 1 && word.ends_with('s') {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Step 1b: -eed, -ed and -ing removal with cleanup of the exposed stem.
fn step1b(word: &str) -> String {
    let reduced = if word.ends_with("eed") {
        replace_suffix(word, "eed", "ee", 1)
    } else if let Some(stem) = word.strip_suffix("ed") {
        if contains_vowel(stem) {
            stem.to_string()
        } else {
            word.to_string()
        }
    } else if let Some(stem) = word.strip_suffix("ing") {
        if contains_vowel(stem) {
            stem.to_string()
        } else {
            word.to_string()
        }
    } else {
        word.to_string()
    };

    if reduced == word {
        return reduced;
    }

    if reduced.ends_with("at") || reduced.ends_with("bl") || reduced.ends_with("iz") {
        format!("{reduced}e")
    } else if ends_with_double_consonant(&reduced)
        && !reduced.ends_with('l')
        && !reduced.ends_with('s')
        && !reduced.ends_with('z')
    {
        reduced[..reduced.len() - 1].to_string()
    } else if measure(&reduced) == 1 && ends_cvc(&reduced) {
        format!("{reduced}e")
    } else {
        reduced
    }
}

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

fn step2(word: &str) -> String {
    for (old, new) in STEP2_SUFFIXES {
        if word.ends_with(old) {
            return replace_suffix(word, old, new, 1);
        }
    }
    word.to_string()
}

fn step3(word: &str) -> String {
    for (old, new) in STEP3_SUFFIXES {
        if word.ends_with(old) {
            return replace_suffix(word, old, new, 1);
        }
    }
    word.to_string()
}

fn step4(word: &str) -> String {
    for suffix in STEP4_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if measure(stem) > 1 {
                // -ion only drops after s or t
                if *suffix != "ion" || stem.ends_with('s') || stem.ends_with('t') {
                    return stem.to_string();
                }
            }
        }
    }
    word.to_string()
}

/// Step 5: final -e removal and -ll reduction.
fn step5(word: &str) -> String {
    let word = if word.ends_with('e') {
        let stem = &word[..word.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            stem.to_string()
        } else {
            word.to_string()
        }
    } else {
        word.to_string()
    };

    if word.ends_with("ll") && measure(&word) > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word
    }
}

/// Porter stemming algorithm.
#[derive(Clone, Debug, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();

        // The suffix rules assume ASCII English; leave anything else alone.
        if word.len() <= 2 || !word.is_ascii() {
            return word;
        }

        let word = step1a(&word);
        let word = step1b(&word);
        let word = step2(&word);
        let word = step3(&word);
        let word = step4(&word);
        step5(&word)
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// A filter that replaces each token's text with its stem.
pub struct StemFilter {
    stemmer: Box<dyn Stemmer>,
}

impl StemFilter {
    /// Create a stem filter using the Porter stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Box::new(PorterStemmer::new()),
        }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Box<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmed: Vec<Token> = tokens
            .map(|mut token| {
                token.text = self.stemmer.stem(&token.text);
                token
            })
            .collect();

        Ok(Box::new(stemmed.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_porter_stemmer() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("died"), "di");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("disabled"), "disabl");
        assert_eq!(stemmer.stem("measuring"), "measur");
        assert_eq!(stemmer.stem("itemization"), "item");
        assert_eq!(stemmer.stem("sensational"), "sensat");
        assert_eq!(stemmer.stem("traditional"), "tradit");
    }

    #[test]
    fn test_porter_short_words_untouched() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("go"), "go");
        assert_eq!(stemmer.stem("AT"), "at");
    }

    #[test]
    fn test_porter_non_ascii_untouched() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("café"), "café");
        assert_eq!(stemmer.stem("naïve"), "naïve");
    }

    #[test]
    fn test_porter_measure() {
        assert_eq!(measure("tree"), 0);
        assert_eq!(measure("trees"), 1);
        assert_eq!(measure("trouble"), 1);
        assert_eq!(measure("troubles"), 2);
    }

    #[test]
    fn test_stem_filter() {
        let filter = StemFilter::new();
        let tokens = vec![Token::new("winning", 0), Token::new("prizes", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "win");
        assert_eq!(result[1].text, "prize");
    }
}
