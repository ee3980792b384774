//! Keyword-in-context search over the corpus text.

use crate::models::ConcordanceHit;
use crate::normalize::clean;

/// Marker wrapped around the matched token in the highlighted context.
pub const HIGHLIGHT_MARK: &str = "**";

/// Finds every occurrence of `term` in `corpus_text`.
///
/// The corpus is tokenized on whitespace without cleaning so the context
/// keeps its original casing and punctuation; only the equality test runs on
/// cleaned forms. An empty or whitespace-only term returns no hits (the UI
/// treats that as "no query yet", not "no results").
///
/// Each hit reports the token index of the match and a context window of
/// `half_width` tokens on either side, clamped to the corpus bounds, with the
/// matched token wrapped in [`HIGHLIGHT_MARK`].
pub fn search(corpus_text: &str, term: &str, half_width: usize) -> Vec<ConcordanceHit> {
    let needle = clean(term.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<&str> = corpus_text.split_whitespace().collect();
    let mut hits = Vec::new();
    for (position, raw) in tokens.iter().enumerate() {
        if clean(raw) != needle {
            continue;
        }
        let lo = position.saturating_sub(half_width);
        let hi = (position + half_width).min(tokens.len() - 1);

        let mut context = String::new();
        for (offset, token) in tokens[lo..=hi].iter().enumerate() {
            if offset > 0 {
                context.push(' ');
            }
            if lo + offset == position {
                context.push_str(HIGHLIGHT_MARK);
                context.push_str(token);
                context.push_str(HIGHLIGHT_MARK);
            } else {
                context.push_str(token);
            }
        }
        hits.push(ConcordanceHit {
            position,
            highlighted_context: context,
        });
    }
    hits
}
