//! Multi-lexicon sentiment scoring.
//!
//! Every document is scored by a "standard" lexicon that drives the
//! per-document records and the corpus-wide aggregates, plus any number of
//! alternate lexicons kept addressable by name so a UI can switch between
//! them without changing the default aggregates.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::models::Document;
use crate::normalize::{clean, tokenize};

static STANDARD_WEIGHTS: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    serde_json::from_str(include_str!("lexicons/standard.json")).expect("valid standard lexicon")
});

static AFINN_WEIGHTS: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    serde_json::from_str(include_str!("lexicons/afinn.json")).expect("valid afinn lexicon")
});

/// Raw output of one lexicon run over one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconScore {
    pub score: f64,
    /// Score normalized by token count, 0 for an empty text.
    pub comparative: f64,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
}

/// A pluggable lexicon-based scoring strategy.
pub trait LexiconScorer: Send + Sync {
    fn name(&self) -> &str;
    fn score(&self, text: &str) -> LexiconScore;
}

/// Scorer backed by a static word→weight table.
pub struct WeightedLexicon {
    name: &'static str,
    weights: &'static HashMap<String, i32>,
}

impl WeightedLexicon {
    /// The default lexicon, weights in roughly `-3..=3`.
    pub fn standard() -> Self {
        Self {
            name: "standard",
            weights: &STANDARD_WEIGHTS,
        }
    }

    /// AFINN-style lexicon, weights in `-5..=5`.
    pub fn afinn() -> Self {
        Self {
            name: "afinn",
            weights: &AFINN_WEIGHTS,
        }
    }
}

impl LexiconScorer for WeightedLexicon {
    fn name(&self) -> &str {
        self.name
    }

    fn score(&self, text: &str) -> LexiconScore {
        let tokens = tokenize(text);
        let mut score: i64 = 0;
        let mut positive_words = Vec::new();
        let mut negative_words = Vec::new();
        for token in &tokens {
            let word = clean(token);
            if let Some(&weight) = self.weights.get(&word) {
                score += i64::from(weight);
                if weight > 0 {
                    positive_words.push(word);
                } else if weight < 0 {
                    negative_words.push(word);
                }
            }
        }
        let comparative = if tokens.is_empty() {
            0.0
        } else {
            score as f64 / tokens.len() as f64
        };
        LexiconScore {
            score: score as f64,
            comparative,
            positive_words,
            negative_words,
        }
    }
}

/// Bucketed sentiment label for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    SlightlyPositive,
    Neutral,
    SlightlyNegative,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 5.0 {
            SentimentLabel::VeryPositive
        } else if score > 2.0 {
            SentimentLabel::Positive
        } else if score > 0.0 {
            SentimentLabel::SlightlyPositive
        } else if score < -5.0 {
            SentimentLabel::VeryNegative
        } else if score < -2.0 {
            SentimentLabel::Negative
        } else if score < 0.0 {
            SentimentLabel::SlightlyNegative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::SlightlyPositive => "Slightly Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::SlightlyNegative => "Slightly Negative",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
        };
        f.write_str(s)
    }
}

/// Per-document sentiment record, driven by the standard lexicon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub id: String,
    /// Date part of the document timestamp.
    pub date: String,
    pub sentiment_score: f64,
    pub comparative: f64,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    /// Truncated source text, for display.
    pub title: String,
    pub emotion_words: Vec<String>,
    pub text_length: usize,
    /// Alternate lexicon results, keyed by lexicon name.
    pub alternates: BTreeMap<String, LexiconScore>,
}

/// Corpus-wide sentiment aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentOverall {
    pub average: f64,
    pub total: f64,
    /// Top 10 positive words by occurrence count, ties in insertion order.
    pub top_positive: Vec<(String, u32)>,
    pub top_negative: Vec<(String, u32)>,
    /// Documents scoring above zero.
    pub positive_count: usize,
    /// Documents scoring below zero.
    pub negative_count: usize,
    /// Population standard deviation of per-document scores.
    pub score_stddev: f64,
}

/// The sentiment view published to the UI: per-document items plus aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentView {
    pub items: Vec<SentimentRecord>,
    pub overall: SentimentOverall,
}

/// Runs the configured lexicons over a document collection.
pub struct SentimentAnalyzer {
    standard: Box<dyn LexiconScorer>,
    alternates: Vec<Box<dyn LexiconScorer>>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self {
            standard: Box::new(WeightedLexicon::standard()),
            alternates: vec![Box::new(WeightedLexicon::afinn())],
        }
    }
}

impl SentimentAnalyzer {
    pub fn new(standard: Box<dyn LexiconScorer>, alternates: Vec<Box<dyn LexiconScorer>>) -> Self {
        Self {
            standard,
            alternates,
        }
    }

    /// Scores every document and aggregates corpus-wide statistics.
    pub fn score_documents(
        &self,
        documents: &[Document],
        options: &AnalysisOptions,
    ) -> SentimentView {
        let mut items = Vec::with_capacity(documents.len());
        for doc in documents {
            let text = doc.source_text();
            let primary = self.standard.score(text);
            let mut alternates = BTreeMap::new();
            for lexicon in &self.alternates {
                alternates.insert(lexicon.name().to_string(), lexicon.score(text));
            }
            let mut emotion_words = primary.positive_words.clone();
            emotion_words.extend(primary.negative_words.iter().cloned());
            items.push(SentimentRecord {
                id: doc.id.clone(),
                date: date_part(&doc.timestamp),
                sentiment_score: primary.score,
                comparative: primary.comparative,
                title: truncate_title(text, options.title_chars),
                emotion_words,
                text_length: text.chars().count(),
                positive_words: primary.positive_words,
                negative_words: primary.negative_words,
                alternates,
            });
        }
        let overall = aggregate(&items);
        SentimentView { items, overall }
    }
}

fn aggregate(items: &[SentimentRecord]) -> SentimentOverall {
    let total: f64 = items.iter().map(|r| r.sentiment_score).sum();
    let average = if items.is_empty() {
        0.0
    } else {
        total / items.len() as f64
    };
    let score_stddev = if items.is_empty() {
        0.0
    } else {
        let variance = items
            .iter()
            .map(|r| (r.sentiment_score - average).powi(2))
            .sum::<f64>()
            / items.len() as f64;
        variance.sqrt()
    };
    SentimentOverall {
        average,
        total,
        top_positive: top_occurrences(items.iter().flat_map(|r| r.positive_words.iter()), 10),
        top_negative: top_occurrences(items.iter().flat_map(|r| r.negative_words.iter()), 10),
        positive_count: items.iter().filter(|r| r.sentiment_score > 0.0).count(),
        negative_count: items.iter().filter(|r| r.sentiment_score < 0.0).count(),
        score_stddev,
    }
}

/// Counts word occurrences and returns the top `limit`, count descending,
/// ties in first-encountered order.
fn top_occurrences<'a>(
    words: impl Iterator<Item = &'a String>,
    limit: usize,
) -> Vec<(String, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for word in words {
        let entry = counts.entry(word.as_str()).or_insert(0);
        if *entry == 0 {
            first_seen.push(word.as_str());
        }
        *entry += 1;
    }
    let mut ranked: Vec<(String, u32)> = first_seen
        .into_iter()
        .map(|word| (word.to_string(), counts[word]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

fn date_part(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => timestamp
            .split('T')
            .next()
            .unwrap_or(timestamp)
            .to_string(),
    }
}

fn truncate_title(text: &str, max_chars: usize) -> String {
    let mut title: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        title.push('…');
    }
    title
}
