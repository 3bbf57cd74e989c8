//! Reference Retriever
//!
//! Selects supporting reference documents for a reply. The retriever owns its
//! own TF-IDF engine built over the reference corpus (title, content, tags).

use std::collections::HashSet;

use email_advising_core::{tokenize, TfIdfEngine};

use super::snippet::build_snippet;
use crate::models::knowledge::KnowledgeArticle;
use crate::models::reference::{AdvisorReference, ReferenceCorpus, ReferenceDocument};
use crate::models::settings::DEFAULT_SNIPPET_MAX_CHARS;
use crate::utils::error::{AppError, AppResult};

/// Immutable TF-IDF retriever over a reference corpus.
pub struct ReferenceRetriever {
    engine: TfIdfEngine,
    documents: Vec<ReferenceDocument>,
    snippet_max_chars: usize,
}

impl ReferenceRetriever {
    /// Build the retriever. Fails on an empty corpus.
    pub fn new(corpus: &ReferenceCorpus) -> AppResult<Self> {
        if corpus.is_empty() {
            return Err(AppError::config(
                "reference corpus must contain at least one document",
            ));
        }

        let tokenized: Vec<Vec<String>> = corpus
            .documents()
            .iter()
            .map(|document| tokenize(&document.index_text()))
            .collect();
        let engine = TfIdfEngine::new(&tokenized)?;

        tracing::debug!(
            documents = engine.document_count(),
            vocabulary = engine.vocabulary_size(),
            "Built reference retriever"
        );

        Ok(Self {
            engine,
            documents: corpus.documents().to_vec(),
            snippet_max_chars: DEFAULT_SNIPPET_MAX_CHARS,
        })
    }

    /// Override the snippet character budget.
    pub fn with_snippet_max_chars(mut self, max_chars: usize) -> Self {
        self.snippet_max_chars = max_chars.max(1);
        self
    }

    /// Retrieve at most `limit` references for `query`.
    ///
    /// When an article is given, its subject and categories are appended to
    /// the query. Every returned reference has a positive score.
    pub fn retrieve(
        &self,
        query: &str,
        article: Option<&KnowledgeArticle>,
        limit: usize,
    ) -> Vec<AdvisorReference> {
        if limit == 0 {
            return Vec::new();
        }

        let mut fragments = vec![query];
        if let Some(article) = article {
            fragments.push(article.subject.as_str());
            fragments.extend(article.categories.iter().map(String::as_str));
        }
        let tokens = tokenize(&fragments.join(" "));
        if tokens.is_empty() {
            return Vec::new();
        }

        let scores = self.engine.similarities(&tokens);
        let mut ranked: Vec<(&ReferenceDocument, f64)> =
            self.documents.iter().zip(scores).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let token_set: HashSet<String> = tokens.into_iter().collect();
        let mut references = Vec::with_capacity(limit);
        for (document, score) in ranked.into_iter().take(limit.saturating_mul(2)) {
            if score <= 0.0 {
                continue;
            }
            references.push(AdvisorReference {
                document_id: document.id.clone(),
                title: document.title.clone(),
                url: document.url.clone(),
                snippet: build_snippet(&document.content, &token_set, self.snippet_max_chars),
                score,
            });
            if references.len() >= limit {
                break;
            }
        }
        references
    }
}
