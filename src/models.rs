//! Input documents and the result-view types published to the UI layer.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

/// A single document as supplied by the storage collaborator.
///
/// The analytics core treats documents as read-only input. The text that is
/// analyzed is [`Document::source_text`]: the processing result (e.g. text
/// extracted from a PDF) when present, the raw content otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_result: Option<String>,
    /// ISO 8601 timestamp, passed through unchanged.
    pub timestamp: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            processing_result: None,
            timestamp: timestamp.into(),
        }
    }

    /// The text all analytic components operate on.
    pub fn source_text(&self) -> &str {
        match &self.processing_result {
            Some(text) => text.as_str(),
            None => self.content.as_str(),
        }
    }
}

/// Identity token for a document collection, used as the invalidation key of
/// the memoized corpus text.
///
/// Callers that already track collection versions can supply their own token;
/// [`CorpusVersion::of`] derives one from the document contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorpusVersion(pub u64);

impl CorpusVersion {
    /// Derive a stable version token by hashing every document's identity,
    /// timestamp, and source text.
    pub fn of(documents: &[Document]) -> Self {
        let mut hasher = Xxh3::new();
        for doc in documents {
            hasher.update(doc.id.as_bytes());
            hasher.update(b"\x1f");
            hasher.update(doc.timestamp.as_bytes());
            hasher.update(b"\x1f");
            hasher.update(doc.source_text().as_bytes());
            hasher.update(b"\x1e");
        }
        CorpusVersion(hasher.digest())
    }
}

/// One row of the word-frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequencyEntry {
    pub word: String,
    pub count: u32,
}

/// Vocabulary-diversity metric over the whole corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TtrResult {
    /// `unique_words / total_words`, 0 for an empty corpus.
    pub ttr: f64,
    pub unique_words: usize,
    pub total_words: usize,
}

/// A single keyword-in-context match.
///
/// `position` is the token index in the whitespace tokenization of the corpus
/// text, not a character offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcordanceHit {
    pub position: usize,
    pub highlighted_context: String,
}

/// One topic cluster from the co-occurrence topic modeler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub main_word: String,
    pub related_words: Vec<String>,
    /// Sum of the main word's co-occurrence counts with all partners.
    pub strength: u64,
    /// `strength` divided by the first (strongest) topic's strength.
    pub normalized_strength: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_text_prefers_processing_result() {
        let mut doc = Document::new("1", "raw", "2024-01-01T00:00:00Z");
        assert_eq!(doc.source_text(), "raw");
        doc.processing_result = Some("extracted".to_string());
        assert_eq!(doc.source_text(), "extracted");
    }

    #[test]
    fn corpus_version_changes_with_content() {
        let a = vec![Document::new("1", "one", "2024-01-01T00:00:00Z")];
        let mut b = a.clone();
        assert_eq!(CorpusVersion::of(&a), CorpusVersion::of(&b));
        b[0].content = "two".to_string();
        assert_ne!(CorpusVersion::of(&a), CorpusVersion::of(&b));
    }

    #[test]
    fn corpus_version_empty_collection_is_stable() {
        assert_eq!(CorpusVersion::of(&[]), CorpusVersion::of(&[]));
    }
}
