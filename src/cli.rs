//! Command Line Interface
//!
//! Argument parsing, advisor assembly, and report formatting for the
//! `email-advising` binary.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use email_advising_llm::{ChatCompletionsGenerator, GeneratorConfig};

use crate::models::response::AdvisorResponse;
use crate::models::settings::{AdvisorSettings, ConfidenceSettings};
use crate::services::advisor::EmailAdvisor;
use crate::services::composer::GeneratorComposer;
use crate::storage::{load_knowledge_base, load_reference_corpus, load_settings};

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "email-advising")]
#[command(version, about = "Generate advising email responses")]
pub struct Args {
    /// Student email body text
    #[arg(long)]
    pub query: String,

    /// Student name
    #[arg(long)]
    pub student_name: Option<String>,

    /// Student ID
    #[arg(long)]
    pub student_id: Option<String>,

    /// Academic term referenced in the question
    #[arg(long)]
    pub term: Option<String>,

    /// Registration deadline to mention in the response
    #[arg(long)]
    pub registration_deadline: Option<String>,

    /// Withdrawal deadline to mention in the response
    #[arg(long)]
    pub withdrawal_deadline: Option<String>,

    /// Financial aid office phone number
    #[arg(long)]
    pub financial_aid_phone: Option<String>,

    /// Financial aid office email
    #[arg(long)]
    pub financial_aid_email: Option<String>,

    /// Knowledge base JSON file
    #[arg(long)]
    pub knowledge_base: PathBuf,

    /// Reference corpus JSON file for supporting documents
    #[arg(long)]
    pub reference_corpus: Option<PathBuf>,

    /// Advisor settings JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the auto-send confidence threshold
    #[arg(long)]
    pub auto_threshold: Option<f64>,

    /// Override the review confidence threshold
    #[arg(long)]
    pub review_threshold: Option<f64>,

    /// Maximum number of references to attach
    #[arg(long)]
    pub max_references: Option<usize>,

    /// Disable retrieval of supporting references
    #[arg(long)]
    pub disable_references: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Chat-completions endpoint for generator-assisted replies
    #[arg(long)]
    pub generator_url: Option<String>,

    /// Model for generator-assisted replies
    #[arg(long)]
    pub generator_model: Option<String>,

    /// API key for the generator endpoint
    #[arg(long, env = "ADVISING_GENERATOR_API_KEY", hide_env_values = true)]
    pub generator_api_key: Option<String>,

    /// Tone requested from the generator
    #[arg(long, default_value = "professional")]
    pub style: String,
}

impl Args {
    /// Request metadata from the optional flags.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        [
            ("student_name", &self.student_name),
            ("student_id", &self.student_id),
            ("term", &self.term),
            ("registration_deadline", &self.registration_deadline),
            ("withdrawal_deadline", &self.withdrawal_deadline),
            ("financial_aid_phone", &self.financial_aid_phone),
            ("financial_aid_email", &self.financial_aid_email),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.to_string()))
        })
        .collect()
    }

    /// Settings file (or defaults) with command line overrides applied.
    pub fn settings(&self) -> Result<AdvisorSettings> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => AdvisorSettings::default(),
        };
        if self.auto_threshold.is_some() || self.review_threshold.is_some() {
            settings.confidence = ConfidenceSettings::new(
                self.auto_threshold
                    .unwrap_or(settings.confidence.auto_send_threshold),
                self.review_threshold
                    .unwrap_or(settings.confidence.review_threshold),
            )?;
        }
        if let Some(limit) = self.max_references {
            settings.reference_limit = limit;
        }
        if self.disable_references {
            settings.disable_references = true;
        }
        Ok(settings)
    }

    fn generator_config(&self) -> Option<GeneratorConfig> {
        if self.generator_url.is_none() && self.generator_model.is_none() {
            return None;
        }
        let defaults = GeneratorConfig::default();
        Some(GeneratorConfig {
            base_url: self.generator_url.clone(),
            model: self.generator_model.clone().unwrap_or(defaults.model),
            api_key: self.generator_api_key.clone(),
            ..defaults
        })
    }
}

/// Assemble the advisor described by `args`.
pub fn build_advisor(args: &Args) -> Result<EmailAdvisor> {
    let settings = args.settings()?;
    let knowledge_base = load_knowledge_base(&args.knowledge_base)?;
    let disable_references = settings.disable_references;
    let mut advisor = EmailAdvisor::new(knowledge_base, settings)?;

    match (&args.reference_corpus, disable_references) {
        (Some(path), false) => {
            let corpus = load_reference_corpus(path)?;
            advisor = advisor.with_corpus(&corpus)?;
        }
        (None, false) => tracing::debug!("No reference corpus given, continuing without references"),
        (_, true) => {}
    }

    if let Some(config) = args.generator_config() {
        let endpoint = config.endpoint().to_string();
        let generator = ChatCompletionsGenerator::new(config)
            .with_context(|| format!("Failed to set up generator for {}", endpoint))?;
        let composer = GeneratorComposer::new(Arc::new(generator)).with_style(args.style.clone());
        advisor = advisor.with_composer(Arc::new(composer));
    }

    Ok(advisor)
}

/// Process the query described by `args` and render the report.
pub fn run(args: &Args) -> Result<String> {
    let advisor = build_advisor(args)?;
    let response = advisor.process(&args.query, &args.metadata());
    match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&response).context("Failed to serialize response")
        }
        OutputFormat::Text => Ok(format_text_response(&response)),
    }
}

/// Human-readable report of one response.
pub fn format_text_response(response: &AdvisorResponse) -> String {
    let mut lines = vec![format!(
        "Decision: {} (confidence {:.2})",
        response.decision.label(),
        response.confidence
    )];
    if let Some(article_id) = &response.article_id {
        lines.push(format!("Matched article: {}", article_id));
    }
    lines.push(format!("Subject: {}", response.subject));

    lines.push(String::new());
    lines.push("Body:".to_string());
    lines.push(response.body.clone());
    lines.push(String::new());
    lines.push("Reasons:".to_string());
    lines.extend(response.reasons.iter().map(|r| format!("- {}", r)));

    if !response.follow_up_questions.is_empty() {
        lines.push(String::new());
        lines.push("Follow-up prompts for advisors:".to_string());
        lines.extend(response.follow_up_questions.iter().map(|q| format!("- {}", q)));
    }

    if !response.references.is_empty() {
        lines.push(String::new());
        lines.push("References:".to_string());
        for (index, reference) in response.references.iter().enumerate() {
            let mut line = format!("[{}] {}", index + 1, reference.title);
            if let Some(url) = &reference.url {
                line.push_str(&format!(" ({})", url));
            }
            line.push_str(&format!(" — support score {:.2}", reference.score));
            lines.push(line);
            if !reference.snippet.is_empty() {
                lines.push(format!("    {}", reference.snippet));
            }
        }
    }

    lines.push(String::new());
    lines.push("Top matches:".to_string());
    for ranked in response.ranked_matches.iter().take(3) {
        lines.push(format!(
            "- {} (ID: {}, confidence {:.2})",
            ranked.subject, ranked.article_id, ranked.confidence
        ));
    }
    lines.join("\n")
}
