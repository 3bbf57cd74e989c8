//! HTTP Client Factory
//!
//! Provides a factory function for building blocking reqwest clients with a
//! per-request time budget.

use std::time::Duration;

use crate::types::{GeneratorError, GeneratorResult};

/// Build a blocking `reqwest` client whose requests time out after `timeout_secs`.
///
/// A zero timeout disables the limit.
pub fn build_http_client(timeout_secs: u64) -> GeneratorResult<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder();
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build().map_err(|e| GeneratorError::ProviderUnavailable {
        message: format!("failed to build HTTP client: {}", e),
    })
}
