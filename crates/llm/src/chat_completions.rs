//! Chat Completions Generator
//!
//! `Generator` implementation for OpenAI-compatible chat-completions endpoints
//! (OpenAI, vLLM, llama.cpp server, LM Studio, ...). The prompt is sent as a
//! single user message and the first choice's content is returned verbatim.

use serde::Deserialize;

use super::generator::Generator;
use super::types::{GeneratorConfig, GeneratorError, GeneratorResult};
use crate::http_client::build_http_client;

/// Blocking chat-completions client.
pub struct ChatCompletionsGenerator {
    config: GeneratorConfig,
    client: reqwest::blocking::Client,
}

impl ChatCompletionsGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        let client = build_http_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns true when the endpoint points at the hosted OpenAI API, which
    /// always needs a key.
    fn requires_api_key(&self) -> bool {
        self.config.endpoint().starts_with("https://api.openai.com")
    }

    /// Build the request body for the API
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "stream": false,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        })
    }

    /// Extract the first choice's text from a response body.
    fn parse_response(body_text: &str) -> GeneratorResult<String> {
        let response: ChatCompletionResponse =
            serde_json::from_str(body_text).map_err(|e| GeneratorError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| GeneratorError::ParseError {
                message: "Response contained no message content".to_string(),
            })
    }
}

impl Generator for ChatCompletionsGenerator {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn generate(&self, prompt: &str) -> GeneratorResult<String> {
        let api_key = self.config.api_key.as_deref();
        if api_key.is_none() && self.requires_api_key() {
            return Err(GeneratorError::missing_api_key(self.config.endpoint()));
        }

        let mut request = self
            .client
            .post(self.config.endpoint())
            .header("Content-Type", "application/json")
            .json(&self.build_request_body(prompt));
        if let Some(key) = api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "sending chat completion");

        let response = request.send().map_err(|e| GeneratorError::NetworkError {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body_text = response.text().map_err(|e| GeneratorError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(GeneratorError::from_http_status(
                status,
                &body_text,
                &self.config.model,
            ));
        }

        Self::parse_response(&body_text)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
