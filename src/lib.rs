#![forbid(unsafe_code)]
//! # Corpus Insights
//!
//! Derived analytical views over an accumulated corpus of documents:
//! word-frequency ranking, multi-lexicon sentiment scoring, type/token ratio,
//! keyword-in-context concordance search, and a lightweight co-occurrence
//! topic model, tied together by a recompute orchestrator.
//!
//! The analytic components are pure functions of their inputs: no I/O, no
//! clock, no randomness. Recomputing from an unchanged document collection
//! yields identical results. The [`engine::AnalysisEngine`] owns the
//! published views, memoizes the concatenated corpus text keyed by a
//! [`models::CorpusVersion`], and offers a narrow search entry point that
//! refreshes only the concordance view.
//!
//! Ingestion ([`ingest`]) and export ([`export`]) are thin collaborators
//! around that core: they turn files into [`models::Document`] values and
//! result views into reports or CSV/TSV/JSON files.
//!
//! ## Example
//! ```
//! use corpus_insights::{AnalysisEngine, AnalysisOptions, CorpusVersion, Document};
//!
//! let docs = vec![Document::new(
//!     "1",
//!     "The cat sat. The cat ran.",
//!     "2024-01-01T00:00:00Z",
//! )];
//! let mut engine = AnalysisEngine::new(AnalysisOptions::default());
//! engine.recompute(&docs, CorpusVersion::of(&docs));
//! assert_eq!(engine.views().word_frequency[0].word, "cat");
//!
//! engine.search("cat");
//! assert_eq!(engine.views().concordance.len(), 2);
//! ```

pub mod analysis;
pub mod concordance;
pub mod engine;
pub mod error;
pub mod export;
pub mod frequency;
pub mod graph;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod office;
pub mod sentiment;
pub mod stopwords;
pub mod topics;
pub mod ttr;

pub use analysis::{AnalysisOptions, AnalysisViews, analyze, analyze_with, corpus_text};
pub use engine::{AnalysisEngine, EngineState, SearchCoalescer};
pub use error::{InsightsError, Result};
pub use export::{ExportFormat, csv_safe_cell, export_views, render_report};
pub use graph::{
    DocumentSimilarity, GraphLink, GraphNode, RelationshipGraph, TokenOverlap, relationship_graph,
};
pub use ingest::{
    IngestReport, collect_files, load_documents, read_document, report_failed_files,
};
pub use models::{
    ConcordanceHit, CorpusVersion, Document, TopicEntry, TtrResult, WordFrequencyEntry,
};
pub use normalize::{clean, cleaned_tokens, tokenize};
pub use office::{extract_docx, extract_odt};
pub use sentiment::{
    LexiconScore, LexiconScorer, SentimentAnalyzer, SentimentLabel, SentimentOverall,
    SentimentRecord, SentimentView, WeightedLexicon,
};
pub use stopwords::{is_stopword, load_extra_stopwords};
