//! Knowledge System
//!
//! Ranking and retrieval over the two read-only corpora:
//! - `matcher`: ranks knowledge base articles against a query
//! - `retriever`: selects citable reference documents for a reply
//! - `snippet`: sentence splitting and excerpt extraction

pub mod matcher;
pub mod retriever;
pub mod snippet;

pub use matcher::{KnowledgeMatcher, MatchStrategy};
pub use retriever::ReferenceRetriever;
pub use snippet::{build_snippet, split_sentences};
