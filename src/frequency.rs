//! Word-frequency ranking over the concatenated corpus text.

use std::collections::HashMap;

use crate::analysis::AnalysisOptions;
use crate::models::WordFrequencyEntry;
use crate::normalize::{clean, tokenize};
use crate::stopwords::is_stopword;

/// Counts cleaned words and returns the top entries by count, descending.
///
/// Only words longer than two characters consisting purely of `a-z` survive,
/// and stopwords are excluded. Ties keep the order in which words were first
/// encountered during aggregation (the sort is stable).
pub fn top_words(corpus_text: &str, options: &AnalysisOptions) -> Vec<WordFrequencyEntry> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for token in tokenize(corpus_text) {
        let word = clean(&token);
        if !is_countable(&word, options) {
            continue;
        }
        let entry = counts.entry(word.clone()).or_insert(0);
        if *entry == 0 {
            first_seen.push(word);
        }
        *entry += 1;
    }

    let mut entries: Vec<WordFrequencyEntry> = first_seen
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            WordFrequencyEntry { word, count }
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(options.max_frequency_entries);
    entries
}

fn is_countable(word: &str, options: &AnalysisOptions) -> bool {
    word.len() > 2
        && word.chars().all(|c| c.is_ascii_lowercase())
        && !is_stopword(word)
        && !options.extra_stopwords.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<(String, u32)> {
        top_words(text, &AnalysisOptions::default())
            .into_iter()
            .map(|e| (e.word, e.count))
            .collect()
    }

    #[test]
    fn counts_and_ranks_descending() {
        let ranked = words("Cat cat dog. Cat dog bird!");
        assert_eq!(ranked[0], ("cat".to_string(), 3));
        assert_eq!(ranked[1], ("dog".to_string(), 2));
        assert_eq!(ranked[2], ("bird".to_string(), 1));
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let ranked = words("zebra apple zebra apple mango");
        assert_eq!(ranked[0].0, "zebra");
        assert_eq!(ranked[1].0, "apple");
        assert_eq!(ranked[2].0, "mango");
    }

    #[test]
    fn filters_stopwords_short_words_and_non_alpha() {
        let ranked = words("the it on cat42 ab cat");
        assert_eq!(ranked, vec![("cat".to_string(), 1)]);
    }

    #[test]
    fn empty_corpus_yields_empty_list() {
        assert!(words("").is_empty());
        assert!(words("   \n\t ").is_empty());
    }

    #[test]
    fn respects_entry_cap() {
        let text: String = (0..60)
            .map(|i| format!("word{} ", "x".repeat(i + 1)))
            .collect();
        let options = AnalysisOptions::default();
        let ranked = top_words(&text, &options);
        assert!(ranked.len() <= options.max_frequency_entries);
    }

    #[test]
    fn extra_stopwords_are_excluded() {
        let mut options = AnalysisOptions::default();
        options.extra_stopwords.insert("cat".to_string());
        let ranked = top_words("cat dog cat", &options);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].word, "dog");
    }
}
