//! Generator Composer
//!
//! Rewrites the template through an external text generator. The generator
//! gets one attempt; an error or panic returns the fallback composer's output
//! unchanged.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use email_advising_llm::Generator;

use super::template::TemplateComposer;
use super::{ComposeRequest, ComposedEmail, EmailComposer};

/// Generator-assisted composer with a template fallback.
pub struct GeneratorComposer {
    generator: Arc<dyn Generator>,
    style: String,
    fallback: TemplateComposer,
    ensure_references: bool,
}

impl GeneratorComposer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            generator,
            style: "professional".to_string(),
            fallback: TemplateComposer::new(),
            ensure_references: true,
        }
    }

    /// Tone requested from the generator.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Composer used when the generator fails.
    pub fn with_fallback(mut self, fallback: TemplateComposer) -> Self {
        self.fallback = fallback;
        self
    }

    /// Append the reference block when the generated body lacks it.
    pub fn with_ensure_references(mut self, ensure: bool) -> Self {
        self.ensure_references = ensure;
        self
    }

    /// Build the generator prompt.
    pub fn build_prompt(&self, request: &ComposeRequest<'_>) -> String {
        let metadata_lines = if request.metadata.is_empty() {
            "(no additional metadata provided)".to_string()
        } else {
            request
                .metadata
                .iter()
                .map(|(key, value)| format!("- {}: {}", key, value))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let reference_block = if request.references.is_empty() {
            "No reference documents matched.".to_string()
        } else {
            request
                .references
                .iter()
                .enumerate()
                .map(|(index, reference)| {
                    format!(
                        "[{}] {} ({}) - {}",
                        index + 1,
                        reference.title,
                        reference.url.as_deref().unwrap_or("internal resource"),
                        reference.snippet
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "You are an experienced academic advisor. Compose a {style} email reply using the guidance below.\n\
             \n\
             Student question:\n\
             {query}\n\
             \n\
             Base template (use this as structured guidance, but improve tone and clarity):\n\
             {body}\n\
             \n\
             Desired email subject: {subject}\n\
             \n\
             Additional metadata:\n\
             {metadata_lines}\n\
             \n\
             Supporting references (cite using [number] notation in the body when applicable):\n\
             {reference_block}\n\
             \n\
             Respond in JSON with keys \"subject\" and \"body\" only. Do not include markdown fences.",
            style = self.style,
            query = request.query,
            body = request.base_body,
            subject = request.base_subject,
            metadata_lines = metadata_lines,
            reference_block = reference_block,
        )
    }
}

impl EmailComposer for GeneratorComposer {
    fn name(&self) -> &str {
        "generator"
    }

    fn compose(&self, request: &ComposeRequest<'_>) -> ComposedEmail {
        let prompt = self.build_prompt(request);
        let outcome = catch_unwind(AssertUnwindSafe(|| self.generator.generate(&prompt)));

        let raw = match outcome {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::warn!(
                    generator = self.generator.name(),
                    kind = e.kind(),
                    error = %e,
                    "Generator failed, using template reply"
                );
                return self.fallback.compose(request);
            }
            Err(_) => {
                tracing::warn!(
                    generator = self.generator.name(),
                    "Generator panicked, using template reply"
                );
                return self.fallback.compose(request);
            }
        };

        let mut email = parse_generated(&raw, request.base_subject, request.base_body);
        if self.ensure_references && !request.references.is_empty() {
            let block = self.fallback.format_references(request.references);
            if !email.body.contains(&block) {
                email.body = format!("{}\n\n{}", email.body.trim_end(), block);
            }
        }
        email
    }
}

/// Parse `{"subject": ..., "body": ...}` out of generator output.
///
/// Prose before the first `{` and anything after the first complete value
/// are ignored. A non-object or unparsable payload yields the base subject
/// and body; empty fields fall back individually.
fn parse_generated(raw: &str, base_subject: &str, base_body: &str) -> ComposedEmail {
    let fallback = || ComposedEmail {
        subject: base_subject.to_string(),
        body: base_body.to_string(),
    };

    let payload = match first_json_value(raw) {
        Some(serde_json::Value::Object(map)) => map,
        Some(_) => {
            tracing::warn!("Generator output was JSON but not an object");
            return fallback();
        }
        None => {
            tracing::warn!("Generator output contained no JSON object");
            return fallback();
        }
    };

    let field = |key: &str, default: &str| -> String {
        let text = match payload.get(key) {
            None | Some(serde_json::Value::Null) => return default.to_string(),
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        };
        if text.is_empty() {
            default.to_string()
        } else {
            text
        }
    };

    ComposedEmail {
        subject: field("subject", base_subject),
        body: field("body", base_body),
    }
}

/// First complete JSON value in `raw`.
///
/// Output that opens with JSON is read from the start, so a top-level array
/// is reported as such. Otherwise reading starts at the first `{`.
fn first_json_value(raw: &str) -> Option<serde_json::Value> {
    let read_one = |text: &str| {
        serde_json::Deserializer::from_str(text)
            .into_iter::<serde_json::Value>()
            .next()
            .and_then(Result::ok)
    };

    let trimmed = raw.trim_start();
    let opens_with_json = trimmed.starts_with('{') || trimmed.starts_with('[');
    opens_with_json.then(|| read_one(trimmed)).flatten().or_else(|| {
        let start = trimmed.find('{')?;
        read_one(&trimmed[start..])
    })
}
