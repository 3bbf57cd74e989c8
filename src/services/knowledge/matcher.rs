//! Knowledge Matcher
//!
//! Ranks knowledge base articles against a student query with a TF-IDF engine
//! built over the articles' example utterances.

use email_advising_core::{tokenize, TfIdfEngine};
use serde::{Deserialize, Serialize};

use crate::models::knowledge::KnowledgeBase;
use crate::models::response::RankedMatch;
use crate::utils::error::{AppError, AppResult};

/// How article documents are formed from utterances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// One document per article: all utterances joined.
    #[default]
    Concatenated,
    /// One document per utterance; an article scores its best utterance.
    BestUtterance,
}

/// Immutable ranker over one knowledge base.
pub struct KnowledgeMatcher {
    engine: TfIdfEngine,
    /// (article id, subject) in knowledge base order
    articles: Vec<(String, String)>,
    /// Article index for each engine document
    document_owner: Vec<usize>,
}

impl KnowledgeMatcher {
    /// Build the matcher. Fails on an empty knowledge base.
    pub fn new(knowledge_base: &KnowledgeBase, strategy: MatchStrategy) -> AppResult<Self> {
        if knowledge_base.is_empty() {
            return Err(AppError::config(
                "knowledge base must contain at least one article",
            ));
        }

        let mut documents = Vec::new();
        let mut document_owner = Vec::new();
        for (index, article) in knowledge_base.iter().enumerate() {
            match strategy {
                MatchStrategy::Concatenated => {
                    documents.push(tokenize(&article.utterance_text()));
                    document_owner.push(index);
                }
                MatchStrategy::BestUtterance => {
                    for utterance in &article.utterances {
                        documents.push(tokenize(utterance));
                        document_owner.push(index);
                    }
                }
            }
        }
        if documents.is_empty() {
            return Err(AppError::config(
                "knowledge base articles must provide at least one utterance",
            ));
        }

        let engine = TfIdfEngine::new(&documents)?;
        let articles = knowledge_base
            .iter()
            .map(|article| (article.id.clone(), article.subject.clone()))
            .collect();

        tracing::debug!(
            articles = knowledge_base.len(),
            documents = engine.document_count(),
            vocabulary = engine.vocabulary_size(),
            ?strategy,
            "Built knowledge matcher"
        );

        Ok(Self {
            engine,
            articles,
            document_owner,
        })
    }

    /// Rank every article against `query`, best first.
    ///
    /// A query with no usable terms yields an empty list. Ties keep knowledge
    /// base order.
    pub fn rank(&self, query: &str) -> Vec<RankedMatch> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scores = vec![0.0_f64; self.articles.len()];
        for (document, similarity) in self.engine.similarities(&tokens).into_iter().enumerate() {
            let owner = self.document_owner[document];
            if similarity > scores[owner] {
                scores[owner] = similarity;
            }
        }

        let mut ranked: Vec<RankedMatch> = self
            .articles
            .iter()
            .zip(scores)
            .map(|((article_id, subject), score)| RankedMatch {
                article_id: article_id.clone(),
                subject: subject.clone(),
                confidence: score.clamp(0.0, 1.0),
            })
            .collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ranked
    }
}
