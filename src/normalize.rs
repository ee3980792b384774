//! Shared tokenization and word normalization.
//!
//! Every component that compares or counts words goes through [`clean`] so
//! that, e.g., a word counted in the frequency ranking matches the same
//! cleaned form used in a concordance search.

/// Lowercases a word and strips surrounding/embedded punctuation.
///
/// # Example
/// ```
/// use corpus_insights::clean;
/// assert_eq!(clean("Hello,"), "hello");
/// assert_eq!(clean("(WORLD!)"), "world");
/// ```
pub fn clean(word: &str) -> String {
    word.to_lowercase().replace(
        &[
            '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '\'', '"',
        ][..],
        "",
    )
}

/// Splits text on runs of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

/// Tokenizes and cleans, dropping tokens that clean down to nothing.
pub fn cleaned_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(clean)
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_punctuation_and_case() {
        assert_eq!(clean("Don't."), "dont");
        assert_eq!(clean("[Bracketed]"), "bracketed");
        assert_eq!(clean("{braced};"), "braced");
        assert_eq!(clean("\"quoted\""), "quoted");
    }

    #[test]
    fn clean_leaves_plain_words_alone() {
        assert_eq!(clean("cat"), "cat");
    }

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        assert_eq!(tokenize("a  b\tc\nd"), vec!["a", "b", "c", "d"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn cleaned_tokens_drops_pure_punctuation() {
        assert_eq!(cleaned_tokens("cat !! dog"), vec!["cat", "dog"]);
    }
}
