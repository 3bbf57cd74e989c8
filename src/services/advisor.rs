//! Email Advisor
//!
//! Runs the full pipeline for one student query: metadata, guardrail, ranking,
//! decision, references, composition. Built once, then shared read-only.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::knowledge::{KnowledgeArticle, KnowledgeBase};
use crate::models::reference::ReferenceCorpus;
use crate::models::response::{AdvisorResponse, RankedMatch};
use crate::models::settings::AdvisorSettings;
use crate::services::composer::{ComposeRequest, EmailComposer, TemplateComposer};
use crate::services::decision::decide;
use crate::services::guardrail::PersonalContentDetector;
use crate::services::knowledge::{KnowledgeMatcher, ReferenceRetriever};
use crate::services::metadata::{render_template, MetadataExtractor};
use crate::utils::error::AppResult;

/// Answers student queries against one knowledge base.
pub struct EmailAdvisor {
    knowledge_base: KnowledgeBase,
    matcher: KnowledgeMatcher,
    detector: PersonalContentDetector,
    retriever: Option<ReferenceRetriever>,
    composer: Arc<dyn EmailComposer>,
    extractor: MetadataExtractor,
    settings: AdvisorSettings,
}

impl EmailAdvisor {
    /// Build an advisor with the template composer and no references.
    ///
    /// Fails on invalid settings or an empty knowledge base.
    pub fn new(knowledge_base: KnowledgeBase, settings: AdvisorSettings) -> AppResult<Self> {
        settings.validate()?;
        let matcher = KnowledgeMatcher::new(&knowledge_base, settings.match_strategy)?;
        let detector = PersonalContentDetector::from_config(&settings.guardrail);

        tracing::info!(
            articles = knowledge_base.len(),
            auto_send_threshold = settings.confidence.auto_send_threshold,
            review_threshold = settings.confidence.review_threshold,
            "Email advisor ready"
        );

        Ok(Self {
            knowledge_base,
            matcher,
            detector,
            retriever: None,
            composer: Arc::new(TemplateComposer::new()),
            extractor: MetadataExtractor::new(),
            settings,
        })
    }

    /// Attach a prebuilt reference retriever.
    pub fn with_retriever(mut self, retriever: ReferenceRetriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Build and attach a retriever over `corpus`. Fails on an empty corpus.
    pub fn with_corpus(self, corpus: &ReferenceCorpus) -> AppResult<Self> {
        let retriever =
            ReferenceRetriever::new(corpus)?.with_snippet_max_chars(self.settings.snippet_max_chars);
        Ok(self.with_retriever(retriever))
    }

    /// Replace the composer.
    pub fn with_composer(mut self, composer: Arc<dyn EmailComposer>) -> Self {
        self.composer = composer;
        self
    }

    pub fn settings(&self) -> &AdvisorSettings {
        &self.settings
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Process one query. Never fails; the worst case is an escalation.
    pub fn process(&self, query: &str, metadata: &BTreeMap<String, String>) -> AdvisorResponse {
        tracing::debug!(query_chars = query.chars().count(), "Processing query");

        let mut request_metadata = metadata.clone();
        if self.settings.extract_metadata {
            self.extractor.fill_missing(query, &mut request_metadata);
        }

        let guardrail = self.detector.check(query);
        let ranked_matches = self.matcher.rank(query);
        let outcome = decide(&ranked_matches, &guardrail, &self.settings.confidence);

        let article = self.composition_article(&ranked_matches);

        let references = match (&self.retriever, self.settings.disable_references) {
            (Some(retriever), false) => {
                retriever.retrieve(query, article, self.settings.reference_limit)
            }
            _ => Vec::new(),
        };

        let mut values = article.map(KnowledgeArticle::metadata_strings).unwrap_or_default();
        values.extend(request_metadata.iter().map(|(k, v)| (k.clone(), v.clone())));

        let (base_subject, base_body) = match article {
            Some(article) => (
                render_template(&article.subject, &values),
                render_template(&article.response_template, &values),
            ),
            None => (
                render_template(&self.settings.holding_subject, &values),
                render_template(&self.settings.holding_body, &values),
            ),
        };

        let email = self.composer.compose(&ComposeRequest {
            article,
            base_subject: &base_subject,
            base_body: &base_body,
            query,
            metadata: &request_metadata,
            references: &references,
        });

        let follow_up_questions = if outcome.decision.requires_human() {
            self.best_candidate(&ranked_matches)
                .map(|candidate| candidate.follow_up_questions.clone())
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        tracing::info!(
            decision = %outcome.decision,
            confidence = outcome.confidence,
            personal = guardrail.is_personal,
            article_id = article.map(|a| a.id.as_str()).unwrap_or("-"),
            references = references.len(),
            composer = self.composer.name(),
            "Query routed"
        );

        AdvisorResponse {
            subject: email.subject,
            body: email.body,
            auto_send: outcome.auto_send(),
            confidence: outcome.confidence,
            decision: outcome.decision,
            article_id: article.map(|a| a.id.clone()),
            follow_up_questions,
            reasons: outcome.reasons,
            ranked_matches,
            references,
        }
    }

    /// Top match, if it is credible enough to answer from.
    fn composition_article(&self, ranked: &[RankedMatch]) -> Option<&KnowledgeArticle> {
        ranked
            .first()
            .filter(|top| {
                top.confidence > 0.0 && top.confidence >= self.settings.confidence.review_threshold
            })
            .and_then(|top| self.knowledge_base.get(&top.article_id))
    }

    /// Top match with any similarity at all.
    fn best_candidate(&self, ranked: &[RankedMatch]) -> Option<&KnowledgeArticle> {
        ranked
            .first()
            .filter(|top| top.confidence > 0.0)
            .and_then(|top| self.knowledge_base.get(&top.article_id))
    }
}
