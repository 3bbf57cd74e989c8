//! Email Advising Core
//!
//! Foundational text processing and error types for the Email Advising
//! workspace. This crate has zero dependencies on application-level code
//! (knowledge base models, composers, generator backends, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `text` - Normalizer and tokenizer (`normalize_text`, `tokenize`)
//! - `tfidf` - TF-IDF engine and sparse cosine similarity (`TfIdfEngine`)
//!
//! ## Design Principles
//!
//! 1. **Pure functions** - tokenizing and scoring touch no shared mutable state
//! 2. **Build once, read many** - engines are immutable after construction
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod text;
pub mod tfidf;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Text Processing ────────────────────────────────────────────────────
pub use text::{is_stop_word, normalize_text, tokenize, STOP_WORDS};

// ── TF-IDF ─────────────────────────────────────────────────────────────
pub use tfidf::{cosine_similarity, SparseVector, TfIdfEngine};
