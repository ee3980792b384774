//! Fixed stopword set used by the frequency ranking and the topic modeler.
//!
//! Sentiment scoring and concordance search deliberately do not filter
//! stopwords: the lexicons judge words directly, and a search term is
//! user-supplied.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::error::Result;

const BUILTIN: &[&str] = &[
    "the", "and", "a", "an", "in", "on", "at", "to", "for", "of", "is", "are", "be", "this",
    "that", "with", "from", "by", "was", "were", "has", "have", "had", "it", "as", "not", "or",
    "but",
];

static BUILTIN_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| BUILTIN.iter().copied().collect());

/// Whether `word` (already cleaned and lowercased) is a function word.
pub fn is_stopword(word: &str) -> bool {
    BUILTIN_SET.contains(word)
}

/// Loads an additional stopword list, one word per line. Entries are
/// lowercased; blank lines are skipped.
pub fn load_extra_stopwords(path: &Path) -> Result<HashSet<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}
