//! Reference Corpus Models
//!
//! Supporting documents used for retrieval-augmented replies.

use serde::{Deserialize, Serialize};

/// A citable supporting document (policy page, catalog entry, FAQ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Full text content
    pub content: String,
    /// Optional public link
    #[serde(default)]
    pub url: Option<String>,
    /// Topic tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ReferenceDocument {
    /// Create a document without url or tags.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            url: None,
            tags: Vec::new(),
        }
    }

    /// Set the public link.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set topic tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Text indexed for retrieval: title, content, then tags.
    pub fn index_text(&self) -> String {
        let mut parts = Vec::with_capacity(2 + self.tags.len());
        parts.push(self.title.as_str());
        parts.push(self.content.as_str());
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Ordered collection of reference documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceCorpus {
    documents: Vec<ReferenceDocument>,
}

impl ReferenceCorpus {
    /// Wrap a list of documents.
    pub fn new(documents: Vec<ReferenceDocument>) -> Self {
        Self { documents }
    }

    /// Documents in load order.
    pub fn documents(&self) -> &[ReferenceDocument] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// A reference selected for one reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorReference {
    /// Source document id
    pub document_id: String,
    /// Source document title
    pub title: String,
    /// Source document link
    pub url: Option<String>,
    /// Short excerpt from the document content
    pub snippet: String,
    /// Retrieval similarity (always > 0)
    pub score: f64,
}
