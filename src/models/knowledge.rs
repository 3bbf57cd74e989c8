//! Knowledge Base Models
//!
//! Pre-authored advising articles and the read-only collection that owns them.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// A single advising article.
///
/// `response_template` and `subject` may contain `{key}` or `{key|default}`
/// placeholders resolved from request metadata and the article's own
/// `metadata` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    /// Unique identifier
    pub id: String,
    /// Subject line for the reply
    pub subject: String,
    /// Category tags (e.g. "registration", "financial-aid")
    #[serde(default)]
    pub categories: Vec<String>,
    /// Example phrasings this article answers
    #[serde(default)]
    pub utterances: Vec<String>,
    /// Reply body template
    pub response_template: String,
    /// Prompts for a human reviewer
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
    /// Free-form metadata (office hours, links, deadlines, ...)
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl KnowledgeArticle {
    /// Create an article with the required fields only.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        utterances: Vec<String>,
        response_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            categories: Vec::new(),
            utterances,
            response_template: response_template.into(),
            follow_up_questions: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Set category tags.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Set follow-up questions.
    pub fn with_follow_up_questions(mut self, questions: Vec<String>) -> Self {
        self.follow_up_questions = questions;
        self
    }

    /// Add one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Metadata rendered as plain strings for placeholder substitution.
    ///
    /// Strings are used verbatim, `null` is skipped, and any other JSON value
    /// uses its compact JSON text.
    pub fn metadata_strings(&self) -> BTreeMap<String, String> {
        self.metadata
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::Null => return None,
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), text))
            })
            .collect()
    }

    /// All utterances joined into one document.
    pub fn utterance_text(&self) -> String {
        self.utterances.join(" ")
    }
}

/// Ordered, read-only collection of articles, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    articles: Vec<KnowledgeArticle>,
}

impl KnowledgeBase {
    /// Build a knowledge base, rejecting duplicate article ids.
    ///
    /// An empty base is allowed here; components that need at least one
    /// article check for it at their own construction.
    pub fn new(articles: Vec<KnowledgeArticle>) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(articles.len());
        for article in &articles {
            if !seen.insert(article.id.as_str()) {
                return Err(AppError::config(format!(
                    "duplicate knowledge base article id: {}",
                    article.id
                )));
            }
        }
        Ok(Self { articles })
    }

    /// Articles in load order.
    pub fn articles(&self) -> &[KnowledgeArticle] {
        &self.articles
    }

    /// Iterate over articles in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, KnowledgeArticle> {
        self.articles.iter()
    }

    /// Look up an article by id.
    pub fn get(&self, id: &str) -> Option<&KnowledgeArticle> {
        self.articles.iter().find(|article| article.id == id)
    }

    /// Number of articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true if there are no articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a KnowledgeArticle;
    type IntoIter = std::slice::Iter<'a, KnowledgeArticle>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}
