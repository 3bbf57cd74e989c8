//! Email Advising - Rust Library
//!
//! Answers student advising emails from a knowledge base of pre-authored
//! articles. It includes:
//! - Data models (knowledge base, reference corpus, settings, responses)
//! - Pipeline services (guardrail, matcher, decision engine, retriever, composers)
//! - JSON loaders for the knowledge base, corpus, and settings
//! - The command line front end

pub mod cli;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::knowledge::{KnowledgeArticle, KnowledgeBase};
pub use models::reference::{AdvisorReference, ReferenceCorpus, ReferenceDocument};
pub use models::response::*;
pub use models::settings::{AdvisorSettings, ConfidenceSettings};
pub use services::advisor::EmailAdvisor;
pub use utils::error::{AppError, AppResult};
