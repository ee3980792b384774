//! Sentence-level co-occurrence topic modeling.
//!
//! This is deliberately lightweight: no probabilistic model, just a symmetric
//! co-occurrence graph reduced to ranked clusters. Two words co-occur when
//! they appear in the same sentence, counted once per sentence regardless of
//! how often either word repeats within it.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::AnalysisOptions;
use crate::models::TopicEntry;
use crate::normalize::{clean, tokenize};
use crate::stopwords::is_stopword;

/// Builds ranked topic clusters from the corpus text.
///
/// Sentences are split on runs of `.`, `!` and `?`; sentences whose trimmed
/// length is five characters or fewer are discarded. Within each sentence,
/// cleaned words longer than two characters that are not stopwords form a
/// deduplicated set, and every unordered pair in that set increments a
/// symmetric co-occurrence count.
///
/// Words are then ranked by total co-occurrence strength. Each word in rank
/// order that has at least one partner becomes the main word of a topic with
/// its strongest partners as related words. A word used as a main word is not
/// selected again, but related words stay eligible as later main words, so
/// clusters may overlap.
pub fn extract_topics(corpus_text: &str, options: &AnalysisOptions) -> Vec<TopicEntry> {
    let mut cooccurrence: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();

    for sentence in corpus_text.split(['.', '!', '?']) {
        if sentence.trim().len() <= 5 {
            continue;
        }
        let mut words: BTreeSet<String> = BTreeSet::new();
        for token in tokenize(sentence) {
            let word = clean(&token);
            if word.len() > 2
                && !is_stopword(&word)
                && !options.extra_stopwords.contains(&word)
            {
                words.insert(word);
            }
        }
        let words: Vec<&String> = words.iter().collect();
        for i in 0..words.len() {
            for j in (i + 1)..words.len() {
                *cooccurrence
                    .entry(words[i].clone())
                    .or_default()
                    .entry(words[j].clone())
                    .or_insert(0) += 1;
                *cooccurrence
                    .entry(words[j].clone())
                    .or_default()
                    .entry(words[i].clone())
                    .or_insert(0) += 1;
            }
        }
    }

    // Rank words by total strength; the stable sort keeps ties alphabetical
    // (BTreeMap iteration order), which makes the output deterministic.
    let mut ranked: Vec<(&String, u64)> = cooccurrence
        .iter()
        .map(|(word, partners)| (word, partners.values().sum()))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut topics: Vec<TopicEntry> = Vec::new();
    for (word, strength) in ranked {
        if topics.len() >= options.max_topics {
            break;
        }
        let partners = &cooccurrence[word];
        if partners.is_empty() {
            continue;
        }
        let mut related: Vec<(&String, u64)> =
            partners.iter().map(|(w, &count)| (w, count)).collect();
        related.sort_by(|a, b| b.1.cmp(&a.1));
        let related_words = related
            .into_iter()
            .take(options.max_related_words)
            .map(|(w, _)| w.clone())
            .collect();
        topics.push(TopicEntry {
            main_word: word.clone(),
            related_words,
            strength,
            normalized_strength: 0.0,
        });
    }

    let divisor = topics.first().map(|t| t.strength).unwrap_or(0).max(1);
    for topic in &mut topics {
        topic.normalized_strength = topic.strength as f64 / divisor as f64;
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(text: &str) -> Vec<TopicEntry> {
        extract_topics(text, &AnalysisOptions::default())
    }

    #[test]
    fn empty_corpus_has_no_topics() {
        assert!(topics("").is_empty());
        assert!(topics(". ! ?").is_empty());
    }

    #[test]
    fn short_sentences_are_discarded() {
        assert!(!topics("cats nap. dogs sit.").is_empty());
        // five characters or fewer after trimming never contribute
        assert!(topics("cat A. dog B.").is_empty());
    }

    #[test]
    fn cooccurrence_counts_once_per_sentence() {
        // "dog" repeats inside the first sentence but the pair only counts once.
        let found = topics("dog dog barks loudly. dog barks again tonight.");
        let dog = found
            .iter()
            .find(|t| t.main_word == "dog")
            .expect("dog topic");
        // dog pairs: (barks x2) + (loudly x1) + (again x1) + (tonight x1) = 5
        assert_eq!(dog.strength, 5);
    }

    #[test]
    fn first_topic_normalizes_to_one() {
        let found = topics("red fox jumps quickly. red fox sleeps. owl hoots softly.");
        assert!(!found.is_empty());
        assert_eq!(found[0].normalized_strength, 1.0);
        for t in &found {
            assert!(t.normalized_strength > 0.0 && t.normalized_strength <= 1.0);
        }
    }

    #[test]
    fn related_words_capped_at_five() {
        let found = topics("hub one two three four five six seven.");
        let hub = found.iter().find(|t| t.main_word == "hub").expect("hub");
        assert!(hub.related_words.len() <= 5);
    }

    #[test]
    fn main_words_are_unique_but_related_words_may_repeat() {
        let found = topics("sun moon glow. sun star glow. moon star shine.");
        let mains: Vec<&str> = found.iter().map(|t| t.main_word.as_str()).collect();
        let mut deduped = mains.clone();
        deduped.dedup();
        assert_eq!(mains.len(), deduped.len());
        // words that appear as related in one topic still lead their own
        let related_somewhere = found
            .iter()
            .flat_map(|t| t.related_words.iter())
            .any(|w| mains.contains(&w.as_str()));
        assert!(related_somewhere);
    }

    #[test]
    fn topic_count_is_capped() {
        let mut sentences = String::new();
        for i in 0..30 {
            sentences.push_str(&format!("word{i}a word{i}b word{i}c. "));
        }
        let found = topics(&sentences);
        assert!(found.len() <= AnalysisOptions::default().max_topics);
    }
}
