//! RAG core data types
//!
//! Types shared by the retriever, the pipeline, and source attribution.

use serde::{Deserialize, Serialize};

/// A chunk of source-document text plus location metadata, returned by
/// retrieval in similarity-rank order.
///
/// Passages are produced by the retriever and consumed read-only by the
/// pipeline and the source attributor; they are never reordered,
/// deduplicated, or truncated on the way through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// The text content of this passage
    pub text: String,
    /// Source document identifier (e.g. a file path)
    pub source: String,
    /// Page number within the source document
    pub page: u32,
    /// Character offset of `text` within the source document
    pub start_index: usize,
}

impl Passage {
    /// Create a new passage
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        page: u32,
        start_index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            page,
            start_index,
        }
    }

    /// Display name for citations: the basename of `source`, with any
    /// directory prefix stripped ('/' and '\' both count as separators).
    pub fn display_name(&self) -> &str {
        self.source
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.source)
    }

    /// Character span of this passage within its source document,
    /// as `(start, end)` with `end = start + text.len()`.
    pub fn span(&self) -> (usize, usize) {
        (self.start_index, self.start_index + self.text.len())
    }
}

/// Output of one pipeline run: the raw model answer plus the passages
/// retrieved for it, in rank order.
///
/// The citation for this answer must be derived from `passages[0]` of this
/// same value, never from a separate retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Raw completion text from the language model
    pub text: String,
    /// Passages retrieved for this query, rank order preserved
    pub passages: Vec<Passage>,
}
