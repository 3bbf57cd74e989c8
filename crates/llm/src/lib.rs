//! Email Advising LLM
//!
//! Provides the text generator abstraction used by generator-assisted reply
//! composition:
//! - `Generator` trait (prompt in, text out, single attempt)
//! - `FnGenerator` closure adapter
//! - `ChatCompletionsGenerator` for OpenAI-compatible HTTP endpoints
//!
//! Also includes the blocking HTTP client factory.

pub mod chat_completions;
pub mod generator;
pub mod http_client;
pub mod types;

// Re-export main types
pub use chat_completions::ChatCompletionsGenerator;
pub use generator::{FnGenerator, Generator};
pub use http_client::build_http_client;
pub use types::*;
