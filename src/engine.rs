//! Recompute orchestrator.
//!
//! Owns the published [`AnalysisViews`], the memoized corpus text, and the
//! search sequencing. Recomputation runs the whole pipeline and publishes all
//! views in one batch; [`AnalysisEngine::search`] re-runs only the
//! concordance view against the memoized corpus text.

use std::panic::{self, AssertUnwindSafe};

use log::error;

use crate::analysis::{self, AnalysisOptions, AnalysisViews};
use crate::concordance;
use crate::models::{ConcordanceHit, CorpusVersion, Document};
use crate::sentiment::SentimentAnalyzer;

/// Orchestrator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No documents.
    Idle,
    /// A recompute is in flight.
    Computing,
    /// All views are populated.
    Ready,
}

/// Memoized corpus text with an explicit invalidation key.
///
/// The key is a caller-supplied [`CorpusVersion`]; the text is rebuilt only
/// when the key changes, never partially.
#[derive(Debug, Default)]
struct CorpusCache {
    key: Option<CorpusVersion>,
    text: String,
}

impl CorpusCache {
    fn refresh(&mut self, documents: &[Document], version: CorpusVersion) {
        if self.key != Some(version) {
            self.text = analysis::corpus_text(documents);
            self.key = Some(version);
        }
    }

    fn invalidate(&mut self) {
        self.key = None;
        self.text.clear();
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Latest-request-wins coalescing for search requests.
///
/// Each request gets a monotonically increasing sequence number; a result may
/// only be published while its sequence number is still the latest issued.
/// This reproduces debounce-like behavior without timers.
#[derive(Debug, Default)]
pub struct SearchCoalescer {
    issued: u64,
}

impl SearchCoalescer {
    /// Registers a new request and returns its sequence number.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether a result computed for `seq` is still the latest request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

/// Stateful orchestrator around the pure analysis pipeline.
pub struct AnalysisEngine {
    options: AnalysisOptions,
    analyzer: SentimentAnalyzer,
    cache: CorpusCache,
    views: AnalysisViews,
    state: EngineState,
    searches: SearchCoalescer,
}

impl AnalysisEngine {
    pub fn new(options: AnalysisOptions) -> Self {
        Self::with_analyzer(options, SentimentAnalyzer::default())
    }

    pub fn with_analyzer(options: AnalysisOptions, analyzer: SentimentAnalyzer) -> Self {
        Self {
            options,
            analyzer,
            cache: CorpusCache::default(),
            views: AnalysisViews::default(),
            state: EngineState::Idle,
            searches: SearchCoalescer::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The currently published views. Never partially updated.
    pub fn views(&self) -> &AnalysisViews {
        &self.views
    }

    pub fn is_loading(&self) -> bool {
        self.views.is_loading
    }

    /// Recomputes every view from the document collection.
    ///
    /// `version` is the identity token of the collection; the memoized corpus
    /// text is rebuilt exactly when it changes. An empty collection resets all
    /// views to their empty defaults without running the algorithms. If the
    /// pipeline panics, the previously published views stay in place
    /// (stale but valid) and the loading flag is still cleared.
    pub fn recompute(&mut self, documents: &[Document], version: CorpusVersion) {
        if documents.is_empty() {
            self.cache.invalidate();
            self.views = AnalysisViews::default();
            self.state = EngineState::Idle;
            return;
        }

        self.state = EngineState::Computing;
        self.views.is_loading = true;
        self.cache.refresh(documents, version);

        let text = self.cache.text();
        let analyzer = &self.analyzer;
        let options = &self.options;
        let computed = panic::catch_unwind(AssertUnwindSafe(|| {
            analysis::analyze_corpus(documents, text, analyzer, options)
        }));

        match computed {
            Ok(views) => {
                // single batch publish, loading flag already false in `views`
                self.views = views;
            }
            Err(_) => {
                error!("analysis pipeline failed; keeping previously published views");
                self.views.is_loading = false;
            }
        }
        self.state = EngineState::Ready;
    }

    /// Re-runs only the concordance view against the memoized corpus text.
    ///
    /// Does not touch the loading flag or any other view. Returns the request
    /// sequence number.
    pub fn search(&mut self, term: &str) -> u64 {
        let seq = self.searches.issue();
        let hits = concordance::search(self.cache.text(), term, self.options.context_window);
        self.publish_search(seq, hits);
        seq
    }

    /// Publishes a search result if `seq` is still the latest request.
    /// Returns whether the result was accepted.
    pub fn publish_search(&mut self, seq: u64, hits: Vec<ConcordanceHit>) -> bool {
        if !self.searches.is_current(seq) {
            return false;
        }
        self.views.concordance = hits;
        true
    }

    /// Issues a sequence number without computing, for callers that run the
    /// concordance search elsewhere (e.g. off the UI thread).
    pub fn issue_search(&mut self) -> u64 {
        self.searches.issue()
    }

    /// The memoized corpus text of the last recompute.
    pub fn corpus_text(&self) -> &str {
        self.cache.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Document> {
        vec![
            Document::new("1", "The cat sat. The cat ran.", "2024-01-01T00:00:00Z"),
            Document::new("2", "A good dog found the cat.", "2024-01-02T00:00:00Z"),
        ]
    }

    fn engine_with(documents: &[Document]) -> AnalysisEngine {
        let mut engine = AnalysisEngine::new(AnalysisOptions::default());
        engine.recompute(documents, CorpusVersion::of(documents));
        engine
    }

    #[test]
    fn starts_idle_with_empty_views() {
        let engine = AnalysisEngine::new(AnalysisOptions::default());
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(!engine.is_loading());
        assert!(engine.views().word_frequency.is_empty());
    }

    #[test]
    fn recompute_publishes_all_views() {
        let engine = engine_with(&docs());
        assert_eq!(engine.state(), EngineState::Ready);
        assert!(!engine.is_loading());
        assert!(!engine.views().word_frequency.is_empty());
        assert_eq!(engine.views().sentiment.items.len(), 2);
        assert!(engine.views().ttr.total_words > 0);
    }

    #[test]
    fn empty_collection_resets_to_idle() {
        let mut engine = engine_with(&docs());
        engine.recompute(&[], CorpusVersion::of(&[]));
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.views().word_frequency.is_empty());
        assert!(!engine.is_loading());
        assert!(engine.corpus_text().is_empty());
    }

    #[test]
    fn corpus_text_is_memoized_by_version() {
        let documents = docs();
        let version = CorpusVersion::of(&documents);
        let mut engine = AnalysisEngine::new(AnalysisOptions::default());
        engine.recompute(&documents, version);
        let first = engine.corpus_text().to_string();

        // same version: text must be identical even if we recompute
        engine.recompute(&documents, version);
        assert_eq!(engine.corpus_text(), first);

        // changed collection, changed version: text follows
        let mut changed = documents.clone();
        changed[0].content = "Entirely new words here.".to_string();
        engine.recompute(&changed, CorpusVersion::of(&changed));
        assert_ne!(engine.corpus_text(), first);
    }

    #[test]
    fn search_touches_only_the_concordance_view() {
        let mut engine = engine_with(&docs());
        let frequency_before = engine.views().word_frequency.clone();

        engine.search("cat");
        assert_eq!(engine.views().concordance.len(), 3);
        assert_eq!(engine.views().word_frequency, frequency_before);
        assert!(!engine.is_loading());
    }

    #[test]
    fn search_after_recompute_sees_new_corpus() {
        let mut engine = engine_with(&docs());
        engine.search("cat");
        assert_eq!(engine.views().concordance.len(), 3);

        let solo = vec![Document::new("9", "cat", "2024-01-03T00:00:00Z")];
        engine.recompute(&solo, CorpusVersion::of(&solo));
        engine.search("cat");
        assert_eq!(engine.views().concordance.len(), 1);
    }

    #[test]
    fn empty_term_publishes_empty_hits() {
        let mut engine = engine_with(&docs());
        engine.search("cat");
        engine.search("   ");
        assert!(engine.views().concordance.is_empty());
    }

    #[test]
    fn stale_search_results_are_discarded() {
        let mut engine = engine_with(&docs());
        let stale = engine.issue_search();
        let fresh = engine.issue_search();

        assert!(!engine.publish_search(
            stale,
            vec![ConcordanceHit {
                position: 0,
                highlighted_context: "**stale**".to_string(),
            }],
        ));
        assert!(engine.publish_search(fresh, Vec::new()));
        assert!(engine.views().concordance.is_empty());
    }

    #[test]
    fn coalescer_accepts_only_latest() {
        let mut coalescer = SearchCoalescer::default();
        let first = coalescer.issue();
        let second = coalescer.issue();
        assert!(!coalescer.is_current(first));
        assert!(coalescer.is_current(second));
    }

    #[test]
    fn recompute_is_idempotent() {
        let documents = docs();
        let version = CorpusVersion::of(&documents);
        let mut a = AnalysisEngine::new(AnalysisOptions::default());
        let mut b = AnalysisEngine::new(AnalysisOptions::default());
        a.recompute(&documents, version);
        b.recompute(&documents, version);
        b.recompute(&documents, version);
        assert_eq!(
            serde_json::to_string(a.views()).unwrap(),
            serde_json::to_string(b.views()).unwrap()
        );
    }
}
