//! Response Models
//!
//! Per-query results returned by the advisor.

use serde::{Deserialize, Serialize};

use super::reference::AdvisorReference;

/// One knowledge base article scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// Article id
    pub article_id: String,
    /// Article subject
    pub subject: String,
    /// Cosine similarity in [0, 1]
    pub confidence: f64,
}

/// Routing outcome for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Confident match, no sensitive content: send without review.
    AutoSend,
    /// A human must check the draft before it goes out.
    NeedsReview,
    /// No sufficiently similar article; hand off to an advisor.
    Escalate,
}

impl Decision {
    /// Returns true if a human has to look at this reply.
    pub fn requires_human(&self) -> bool {
        !matches!(self, Decision::AutoSend)
    }

    /// Label used in the text report.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::AutoSend => "AUTO-SEND",
            Decision::NeedsReview => "REQUIRES REVIEW",
            Decision::Escalate => "ESCALATE",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::AutoSend => write!(f, "auto_send"),
            Decision::NeedsReview => write!(f, "needs_review"),
            Decision::Escalate => write!(f, "escalate"),
        }
    }
}

/// Final result of processing one student query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorResponse {
    /// Reply subject
    pub subject: String,
    /// Reply body
    pub body: String,
    /// True iff `decision` is `AutoSend`
    pub auto_send: bool,
    /// Top match similarity (0.0 when nothing matched)
    pub confidence: f64,
    /// Routing decision
    pub decision: Decision,
    /// Article whose template produced the reply, if any
    pub article_id: Option<String>,
    /// Prompts for the human reviewer
    pub follow_up_questions: Vec<String>,
    /// Human-readable justification for the decision
    pub reasons: Vec<String>,
    /// Every article, best first
    #[serde(rename = "matches")]
    pub ranked_matches: Vec<RankedMatch>,
    /// Supporting references attached to the reply
    pub references: Vec<AdvisorReference>,
}
