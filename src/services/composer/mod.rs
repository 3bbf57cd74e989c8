//! Reply Composition
//!
//! Renders the final subject and body of a reply. Two composers share the
//! `EmailComposer` contract:
//! - `TemplateComposer`: the article template plus a reference list
//! - `GeneratorComposer`: rewrites the template through a text generator and
//!   falls back to its own `TemplateComposer` on any failure

pub mod generator;
pub mod template;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::knowledge::KnowledgeArticle;
use crate::models::reference::AdvisorReference;

pub use generator::GeneratorComposer;
pub use template::TemplateComposer;

/// Inputs for composing one reply.
#[derive(Debug, Clone, Copy)]
pub struct ComposeRequest<'a> {
    /// Article the reply is based on (none for the holding reply)
    pub article: Option<&'a KnowledgeArticle>,
    /// Rendered subject
    pub base_subject: &'a str,
    /// Rendered body
    pub base_body: &'a str,
    /// Original student question
    pub query: &'a str,
    /// Merged request metadata
    pub metadata: &'a BTreeMap<String, String>,
    /// References to cite
    pub references: &'a [AdvisorReference],
}

/// Final reply text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedEmail {
    pub subject: String,
    pub body: String,
}

/// Produces the final subject and body for a reply.
///
/// Implementations must not fail: any internal problem degrades to a
/// deterministic reply.
pub trait EmailComposer: Send + Sync {
    /// Composer name for logs.
    fn name(&self) -> &str;

    /// Compose the reply.
    fn compose(&self, request: &ComposeRequest<'_>) -> ComposedEmail;
}
