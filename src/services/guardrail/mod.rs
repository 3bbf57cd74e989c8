//! Personal Content Guardrail
//!
//! Scans student messages for sensitive topics (mental health, medical,
//! financial hardship, family emergencies, safety, academic distress). A hit
//! never rewrites text; it only vetoes automatic sending.
//!
//! ## Architecture
//!
//! - `PersonalContentDetector`: compiled keyword and phrase matcher
//! - `GuardrailResult`: matched terms in declaration order plus derived reasons
//! - `GuardrailConfig`: optional replacement keyword and phrase lists

pub mod personal;

use serde::{Deserialize, Serialize};

pub use personal::{PersonalContentDetector, DEFAULT_KEYWORDS, DEFAULT_PHRASES};

/// Result of scanning one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailResult {
    /// True iff at least one keyword or phrase matched
    pub is_personal: bool,
    /// Matched keywords, in configured order
    pub matched_keywords: Vec<String>,
    /// Matched phrases, in configured order
    pub matched_phrases: Vec<String>,
}

impl GuardrailResult {
    /// Human-readable explanation of what matched.
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if !self.matched_keywords.is_empty() {
            reasons.push(format!(
                "Sensitive keywords detected: {}",
                self.matched_keywords.join(", ")
            ));
        }
        if !self.matched_phrases.is_empty() {
            reasons.push(format!(
                "Sensitive phrases detected: {}",
                self.matched_phrases.join(", ")
            ));
        }
        reasons
    }
}

/// Guardrail list overrides.
///
/// `None` (or an empty list) keeps the built-in defaults for that list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Whole-word keywords
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Free substring phrases
    #[serde(default)]
    pub phrases: Option<Vec<String>>,
}
