//! JSON Loaders
//!
//! Reads the knowledge base, the reference corpus, and advisor settings from
//! JSON files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::models::knowledge::{KnowledgeArticle, KnowledgeBase};
use crate::models::reference::{ReferenceCorpus, ReferenceDocument};
use crate::models::settings::AdvisorSettings;
use crate::utils::error::{AppError, AppResult};

/// Load a knowledge base from a JSON array of articles.
pub fn load_knowledge_base(path: impl AsRef<Path>) -> AppResult<KnowledgeBase> {
    let path = path.as_ref();
    let articles: Vec<KnowledgeArticle> = read_json(path, "Knowledge base")?;
    let knowledge_base = KnowledgeBase::new(articles)?;
    tracing::debug!(path = %path.display(), articles = knowledge_base.len(), "Loaded knowledge base");
    Ok(knowledge_base)
}

/// Load a reference corpus from a JSON array of documents.
pub fn load_reference_corpus(path: impl AsRef<Path>) -> AppResult<ReferenceCorpus> {
    let path = path.as_ref();
    let documents: Vec<ReferenceDocument> = read_json(path, "Reference corpus")?;
    tracing::debug!(path = %path.display(), documents = documents.len(), "Loaded reference corpus");
    Ok(ReferenceCorpus::new(documents))
}

/// Load and validate advisor settings. Missing fields take their defaults.
pub fn load_settings(path: impl AsRef<Path>) -> AppResult<AdvisorSettings> {
    let settings: AdvisorSettings = read_json(path.as_ref(), "Settings")?;
    settings.validate()?;
    Ok(settings)
}

fn read_json<T: DeserializeOwned>(path: &Path, label: &str) -> AppResult<T> {
    if !path.exists() {
        return Err(AppError::not_found(format!(
            "{} file not found: {}",
            label,
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
