//! Decision Engine
//!
//! Turns the ranked matches and the guardrail result into a routing decision.
//! Pure: the same inputs always produce the same outcome.

use serde::{Deserialize, Serialize};

use crate::models::response::{Decision, RankedMatch};
use crate::models::settings::ConfidenceSettings;
use crate::services::guardrail::GuardrailResult;

/// Decision plus the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    /// Routing decision
    pub decision: Decision,
    /// Top match confidence, 0.0 without matches
    pub confidence: f64,
    /// Human-readable justification
    pub reasons: Vec<String>,
}

impl DecisionOutcome {
    /// True iff the reply may be sent without review.
    pub fn auto_send(&self) -> bool {
        self.decision == Decision::AutoSend
    }
}

/// Decide how a query is routed.
///
/// Sensitive content always forces `NeedsReview`, whatever the confidence.
pub fn decide(
    matches: &[RankedMatch],
    guardrail: &GuardrailResult,
    settings: &ConfidenceSettings,
) -> DecisionOutcome {
    let top = matches.first();
    let confidence = top.map(|m| m.confidence).unwrap_or(0.0).clamp(0.0, 1.0);

    let mut reasons = Vec::new();
    match top.filter(|best| best.confidence > 0.0) {
        Some(best) => reasons.push(format!(
            "Top match '{}' ({}) scored {:.2}",
            best.subject, best.article_id, confidence
        )),
        None => reasons.push("No knowledge base article matched the query".to_string()),
    }

    let decision = if guardrail.is_personal {
        reasons.extend(guardrail.reasons());
        reasons.push(
            "Personal or sensitive content detected; auto-send disabled and routed to human review"
                .to_string(),
        );
        reasons.push(format!(
            "Confidence {:.2} not compared against auto-send threshold {:.2}",
            confidence, settings.auto_send_threshold
        ));
        Decision::NeedsReview
    } else if confidence >= settings.auto_send_threshold {
        reasons.push(format!(
            "Confidence {:.2} meets auto-send threshold {:.2}",
            confidence, settings.auto_send_threshold
        ));
        Decision::AutoSend
    } else if confidence >= settings.review_threshold {
        reasons.push(format!(
            "Confidence {:.2} is below auto-send threshold {:.2} but meets review threshold {:.2}",
            confidence, settings.auto_send_threshold, settings.review_threshold
        ));
        Decision::NeedsReview
    } else {
        reasons.push(format!(
            "Confidence {:.2} is below review threshold {:.2}; escalating to an advisor",
            confidence, settings.review_threshold
        ));
        Decision::Escalate
    };

    DecisionOutcome {
        decision,
        confidence,
        reasons,
    }
}
