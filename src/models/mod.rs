//! Data Models
//!
//! Knowledge base, reference corpus, settings, and per-query response types.

pub mod knowledge;
pub mod reference;
pub mod response;
pub mod settings;

pub use knowledge::{KnowledgeArticle, KnowledgeBase};
pub use reference::{AdvisorReference, ReferenceCorpus, ReferenceDocument};
pub use response::{AdvisorResponse, Decision, RankedMatch};
pub use settings::{AdvisorSettings, ConfidenceSettings};
