//! Type/token ratio (lexical diversity) over the corpus text.

use std::collections::HashSet;

use crate::models::TtrResult;
use crate::normalize::cleaned_tokens;

/// Ratio of distinct cleaned tokens to total cleaned tokens.
///
/// Unlike the frequency ranking, no stopword filtering happens here: function
/// words count toward both types and tokens.
pub fn calculate(corpus_text: &str) -> TtrResult {
    let tokens = cleaned_tokens(corpus_text);
    let total_words = tokens.len();
    let unique_words = tokens.iter().collect::<HashSet<_>>().len();
    let ttr = if total_words > 0 {
        unique_words as f64 / total_words as f64
    } else {
        0.0
    };
    TtrResult {
        ttr,
        unique_words,
        total_words,
    }
}
