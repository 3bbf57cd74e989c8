//! Services
//!
//! The advising pipeline. Each stage is a standalone service; `advisor` wires
//! them together.

pub mod advisor;
pub mod composer;
pub mod decision;
pub mod guardrail;
pub mod knowledge;
pub mod metadata;

pub use advisor::EmailAdvisor;
pub use composer::{ComposeRequest, ComposedEmail, EmailComposer, GeneratorComposer, TemplateComposer};
pub use decision::{decide, DecisionOutcome};
pub use guardrail::{GuardrailConfig, GuardrailResult, PersonalContentDetector};
pub use knowledge::{KnowledgeMatcher, MatchStrategy, ReferenceRetriever};
pub use metadata::{render_template, MetadataExtractor};
