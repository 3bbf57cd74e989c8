//! Generator Types
//!
//! Configuration and error types shared by every generator backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chat-completions endpoint
pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Configuration for an HTTP-backed generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Full chat-completions URL. Falls back to the OpenAI endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model name sent with every request
    pub model: String,
    /// API key (sent as a bearer token)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds. The generator makes a single attempt.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeneratorConfig {
    /// Resolved endpoint URL
    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_CHAT_COMPLETIONS_URL)
    }
}

/// Error types for generator calls
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorError {
    /// Missing, invalid or rejected API key
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },
    #[error("Rate limited: {message}")]
    RateLimited { message: String },
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },
    /// The backend rejected the request body
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
    #[error("Server error{}: {message}", status_suffix(.status))]
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Connection failures and timeouts
    #[error("Network error: {message}")]
    NetworkError { message: String },
    /// The response body was not a chat completion
    #[error("Parse error: {message}")]
    ParseError { message: String },
    #[error("Generator unavailable: {message}")]
    ProviderUnavailable { message: String },
    #[error("Generator error: {message}")]
    Other { message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" ({})", code)).unwrap_or_default()
}

impl GeneratorError {
    /// Error for a hosted endpoint called without a key.
    pub fn missing_api_key(endpoint: &str) -> Self {
        GeneratorError::AuthenticationFailed {
            message: format!("no API key configured for {}", endpoint),
        }
    }

    /// Classify a non-200 response from the endpoint.
    ///
    /// `model` is reported for 404s, which chat-completions servers return
    /// for unknown models.
    pub fn from_http_status(status: u16, body: &str, model: &str) -> Self {
        let message = body.trim().to_string();
        match status {
            400 | 422 => GeneratorError::InvalidRequest { message },
            401 | 403 => GeneratorError::AuthenticationFailed {
                message: format!("HTTP {}: {}", status, message),
            },
            404 => GeneratorError::ModelNotFound {
                model: model.to_string(),
            },
            429 => GeneratorError::RateLimited { message },
            500..=599 => GeneratorError::ServerError {
                message,
                status: Some(status),
            },
            _ => GeneratorError::Other {
                message: format!("unexpected HTTP {}: {}", status, message),
            },
        }
    }

    /// Short machine-readable label, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorError::AuthenticationFailed { .. } => "authentication_failed",
            GeneratorError::RateLimited { .. } => "rate_limited",
            GeneratorError::ModelNotFound { .. } => "model_not_found",
            GeneratorError::InvalidRequest { .. } => "invalid_request",
            GeneratorError::ServerError { .. } => "server_error",
            GeneratorError::NetworkError { .. } => "network_error",
            GeneratorError::ParseError { .. } => "parse_error",
            GeneratorError::ProviderUnavailable { .. } => "provider_unavailable",
            GeneratorError::Other { .. } => "other",
        }
    }
}

/// Result type for generator calls
pub type GeneratorResult<T> = Result<T, GeneratorError>;
