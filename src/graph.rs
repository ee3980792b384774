//! Document relationship graph with a pluggable similarity function.
//!
//! The linking strategy is intentionally abstract: callers provide (or pick)
//! a [`DocumentSimilarity`] implementation, and the graph builder only wires
//! nodes and thresholded links. The crate ships a deterministic token-overlap
//! default.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Document;
use crate::normalize::cleaned_tokens;

/// Scores how related two documents are, in `[0, 1]`.
pub trait DocumentSimilarity {
    fn score(&self, a: &Document, b: &Document) -> f64;
}

/// Jaccard overlap of the documents' cleaned token sets.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenOverlap;

impl DocumentSimilarity for TokenOverlap {
    fn score(&self, a: &Document, b: &Document) -> f64 {
        let set_a: BTreeSet<String> = cleaned_tokens(a.source_text()).into_iter().collect();
        let set_b: BTreeSet<String> = cleaned_tokens(b.source_text()).into_iter().collect();
        if set_a.is_empty() || set_b.is_empty() {
            return 0.0;
        }
        let intersection = set_a.intersection(&set_b).count() as f64;
        let union = set_a.union(&set_b).count() as f64;
        intersection / union
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    /// Truncated source text, for display.
    pub label: String,
    /// Source text length in characters; the UI sizes nodes by it.
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationshipGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

const LABEL_CHARS: usize = 40;

/// Builds the document graph: one node per document, one link per document
/// pair whose similarity reaches `threshold`.
pub fn relationship_graph(
    documents: &[Document],
    similarity: &dyn DocumentSimilarity,
    threshold: f64,
) -> RelationshipGraph {
    let nodes = documents
        .iter()
        .map(|doc| {
            let text = doc.source_text();
            GraphNode {
                id: doc.id.clone(),
                label: text.chars().take(LABEL_CHARS).collect(),
                size: text.chars().count(),
            }
        })
        .collect();

    let mut links = Vec::new();
    for i in 0..documents.len() {
        for j in (i + 1)..documents.len() {
            let weight = similarity.score(&documents[i], &documents[j]);
            if weight >= threshold {
                links.push(GraphLink {
                    source: documents[i].id.clone(),
                    target: documents[j].id.clone(),
                    weight,
                });
            }
        }
    }
    RelationshipGraph { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str) -> Document {
        Document::new(id, text, "2024-01-01T00:00:00Z")
    }

    #[test]
    fn identical_documents_score_one() {
        let a = doc("a", "red fox jumps");
        let b = doc("b", "red fox jumps");
        assert_eq!(TokenOverlap.score(&a, &b), 1.0);
    }

    #[test]
    fn disjoint_documents_score_zero() {
        let a = doc("a", "red fox");
        let b = doc("b", "blue whale");
        assert_eq!(TokenOverlap.score(&a, &b), 0.0);
    }

    #[test]
    fn empty_documents_never_link() {
        let a = doc("a", "");
        let b = doc("b", "");
        assert_eq!(TokenOverlap.score(&a, &b), 0.0);
    }

    #[test]
    fn graph_links_only_above_threshold() {
        let docs = vec![
            doc("a", "red fox jumps high"),
            doc("b", "red fox sleeps"),
            doc("c", "unrelated topic entirely"),
        ];
        let graph = relationship_graph(&docs, &TokenOverlap, 0.2);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].source, "a");
        assert_eq!(graph.links[0].target, "b");
    }

    #[test]
    fn nodes_are_sized_by_content_length() {
        let docs = vec![doc("a", "four"), doc("b", "a longer body of text")];
        let graph = relationship_graph(&docs, &TokenOverlap, 2.0);
        assert_eq!(graph.nodes[0].size, 4);
        assert_eq!(graph.nodes[1].size, 21);
        assert!(graph.links.is_empty());
    }
}
