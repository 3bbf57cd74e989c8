//! Settings Models
//!
//! Advisor configuration: confidence thresholds, reference retrieval, and the
//! holding reply used when no article is credible enough to answer.

use serde::{Deserialize, Serialize};

use crate::services::guardrail::GuardrailConfig;
use crate::services::knowledge::MatchStrategy;
use crate::utils::error::{AppError, AppResult};

/// Default auto-send threshold
pub const DEFAULT_AUTO_SEND_THRESHOLD: f64 = 0.75;
/// Default review threshold
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.40;
/// Default number of references attached to a reply
pub const DEFAULT_REFERENCE_LIMIT: usize = 3;
/// Default snippet budget in characters
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 200;

/// Confidence thresholds used by the decision engine.
///
/// Both thresholds lie in [0, 1] and `auto_send_threshold >= review_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSettings {
    /// Minimum confidence to send without review
    #[serde(default = "default_auto_send_threshold")]
    pub auto_send_threshold: f64,
    /// Minimum confidence to draft a reply for review instead of escalating
    #[serde(default = "default_review_threshold")]
    pub review_threshold: f64,
}

fn default_auto_send_threshold() -> f64 {
    DEFAULT_AUTO_SEND_THRESHOLD
}

fn default_review_threshold() -> f64 {
    DEFAULT_REVIEW_THRESHOLD
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            auto_send_threshold: DEFAULT_AUTO_SEND_THRESHOLD,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

impl ConfidenceSettings {
    /// Create validated thresholds.
    pub fn new(auto_send_threshold: f64, review_threshold: f64) -> AppResult<Self> {
        let settings = Self {
            auto_send_threshold,
            review_threshold,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Override either threshold, keeping the default for the other.
    pub fn with_overrides(auto_send: Option<f64>, review: Option<f64>) -> AppResult<Self> {
        let defaults = Self::default();
        Self::new(
            auto_send.unwrap_or(defaults.auto_send_threshold),
            review.unwrap_or(defaults.review_threshold),
        )
    }

    /// Validate the thresholds
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("auto_send_threshold", self.auto_send_threshold),
            ("review_threshold", self.review_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.auto_send_threshold < self.review_threshold {
            return Err(AppError::config(format!(
                "auto_send_threshold ({}) must be >= review_threshold ({})",
                self.auto_send_threshold, self.review_threshold
            )));
        }
        Ok(())
    }
}

/// Full advisor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    /// Decision thresholds
    #[serde(default)]
    pub confidence: ConfidenceSettings,
    /// Maximum references attached to a reply
    #[serde(default = "default_reference_limit")]
    pub reference_limit: usize,
    /// Skip reference retrieval entirely
    #[serde(default)]
    pub disable_references: bool,
    /// Snippet budget in characters
    #[serde(default = "default_snippet_max_chars")]
    pub snippet_max_chars: usize,
    /// Fill missing metadata (term, student id, email) from the query text
    #[serde(default = "default_extract_metadata")]
    pub extract_metadata: bool,
    /// How articles are scored against a query
    #[serde(default)]
    pub match_strategy: MatchStrategy,
    /// Subject used when no article is credible enough to answer
    #[serde(default = "default_holding_subject")]
    pub holding_subject: String,
    /// Body used when no article is credible enough to answer
    #[serde(default = "default_holding_body")]
    pub holding_body: String,
    /// Guardrail keyword and phrase overrides
    #[serde(default)]
    pub guardrail: GuardrailConfig,
}

fn default_reference_limit() -> usize {
    DEFAULT_REFERENCE_LIMIT
}

fn default_snippet_max_chars() -> usize {
    DEFAULT_SNIPPET_MAX_CHARS
}

fn default_extract_metadata() -> bool {
    true
}

fn default_holding_subject() -> String {
    "Re: Your advising question".to_string()
}

fn default_holding_body() -> String {
    "Hi {student_name|there},\n\n\
     Thank you for reaching out to Academic Advising. An advisor will review \
     your message and follow up with you shortly.\n\n\
     Best regards,\nAcademic Advising"
        .to_string()
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            confidence: ConfidenceSettings::default(),
            reference_limit: default_reference_limit(),
            disable_references: false,
            snippet_max_chars: default_snippet_max_chars(),
            extract_metadata: default_extract_metadata(),
            match_strategy: MatchStrategy::default(),
            holding_subject: default_holding_subject(),
            holding_body: default_holding_body(),
            guardrail: GuardrailConfig::default(),
        }
    }
}

impl AdvisorSettings {
    /// Validate the configuration
    pub fn validate(&self) -> AppResult<()> {
        self.confidence.validate()?;
        if self.snippet_max_chars == 0 {
            return Err(AppError::config("snippet_max_chars must be at least 1"));
        }
        Ok(())
    }
}
