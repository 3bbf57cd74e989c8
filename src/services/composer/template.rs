//! Template Composer

use super::{ComposeRequest, ComposedEmail, EmailComposer};
use crate::models::reference::AdvisorReference;

/// Returns the rendered template, with a numbered reference list appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateComposer {
    include_references: bool,
    reference_heading: String,
}

impl TemplateComposer {
    pub fn new() -> Self {
        Self {
            include_references: true,
            reference_heading: "References".to_string(),
        }
    }

    /// Toggle the reference list.
    pub fn with_references(mut self, include: bool) -> Self {
        self.include_references = include;
        self
    }

    /// Heading printed above the reference list.
    pub fn with_reference_heading(mut self, heading: impl Into<String>) -> Self {
        self.reference_heading = heading.into();
        self
    }

    /// Format references as a numbered block:
    ///
    /// ```text
    /// References:
    /// [1] Title (url) — snippet
    /// ```
    pub fn format_references(&self, references: &[AdvisorReference]) -> String {
        let mut lines = Vec::with_capacity(references.len() + 1);
        lines.push(format!("{}:", self.reference_heading));
        for (index, reference) in references.iter().enumerate() {
            let mut line = format!("[{}] {}", index + 1, reference.title);
            if let Some(url) = reference.url.as_deref().filter(|u| !u.is_empty()) {
                line.push_str(&format!(" ({})", url));
            }
            if !reference.snippet.is_empty() {
                line.push_str(&format!(" — {}", reference.snippet));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl Default for TemplateComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailComposer for TemplateComposer {
    fn name(&self) -> &str {
        "template"
    }

    fn compose(&self, request: &ComposeRequest<'_>) -> ComposedEmail {
        let mut body = request.base_body.trim_end().to_string();
        if self.include_references && !request.references.is_empty() {
            body.push_str("\n\n");
            body.push_str(&self.format_references(request.references));
        }
        ComposedEmail {
            subject: request.base_subject.to_string(),
            body,
        }
    }
}
