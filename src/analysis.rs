//! The stateless analysis pipeline: documents in, result views out.

use std::collections::HashSet;

use serde::Serialize;

use crate::frequency;
use crate::models::{ConcordanceHit, Document, TopicEntry, TtrResult, WordFrequencyEntry};
use crate::sentiment::{SentimentAnalyzer, SentimentView};
use crate::topics;
use crate::ttr;

/// Tuning knobs shared by the analytic components.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Concordance context half-width, in tokens on either side of a match.
    pub context_window: usize,
    /// Cap on the word-frequency ranking.
    pub max_frequency_entries: usize,
    /// Cap on the number of topics.
    pub max_topics: usize,
    /// Cap on related words per topic.
    pub max_related_words: usize,
    /// Character cap for the per-document display title.
    pub title_chars: usize,
    /// Extra stopwords on top of the builtin set (frequency and topics only).
    pub extra_stopwords: HashSet<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            context_window: 7,
            max_frequency_entries: 50,
            max_topics: 12,
            max_related_words: 5,
            title_chars: 60,
            extra_stopwords: HashSet::new(),
        }
    }
}

/// The five result views plus the loading flag, as polled by the UI layer.
///
/// Views are always replaced as a whole so a consumer never observes a
/// partially updated set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisViews {
    pub word_frequency: Vec<WordFrequencyEntry>,
    pub sentiment: SentimentView,
    pub ttr: TtrResult,
    pub topics: Vec<TopicEntry>,
    pub concordance: Vec<ConcordanceHit>,
    pub is_loading: bool,
}

/// Whitespace-joined concatenation of every document's source text.
pub fn corpus_text(documents: &[Document]) -> String {
    documents
        .iter()
        .map(Document::source_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the full pipeline with the default sentiment lexicons.
///
/// Pure and deterministic: recomputing from an unchanged collection yields
/// identical results. The concordance view starts empty; it is only filled by
/// an explicit search.
pub fn analyze(documents: &[Document], options: &AnalysisOptions) -> AnalysisViews {
    analyze_with(documents, &SentimentAnalyzer::default(), options)
}

/// Runs the full pipeline with a caller-supplied sentiment analyzer.
pub fn analyze_with(
    documents: &[Document],
    analyzer: &SentimentAnalyzer,
    options: &AnalysisOptions,
) -> AnalysisViews {
    let text = corpus_text(documents);
    analyze_corpus(documents, &text, analyzer, options)
}

/// Pipeline entry for callers that already hold the concatenated corpus text
/// (the orchestrator memoizes it).
pub(crate) fn analyze_corpus(
    documents: &[Document],
    text: &str,
    analyzer: &SentimentAnalyzer,
    options: &AnalysisOptions,
) -> AnalysisViews {
    AnalysisViews {
        word_frequency: frequency::top_words(text, options),
        sentiment: analyzer.score_documents(documents, options),
        ttr: ttr::calculate(text),
        topics: topics::extract_topics(text, options),
        concordance: Vec::new(),
        is_loading: false,
    }
}
