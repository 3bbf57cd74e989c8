//! Generator Trait
//!
//! Defines the text-in/text-out contract every generation backend satisfies.
//! Callers treat the backend as opaque: only the error contract matters.

use super::types::GeneratorResult;

/// Trait that all text generators must implement.
///
/// A generator takes a fully rendered prompt and returns raw text. It makes a
/// single attempt; retries and fallbacks are the caller's concern.
pub trait Generator: Send + Sync {
    /// Returns the generator name for identification in logs.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    fn generate(&self, prompt: &str) -> GeneratorResult<String>;
}

/// Generator backed by a plain closure.
///
/// Handy for wiring in an existing client or for tests.
pub struct FnGenerator<F> {
    name: String,
    func: F,
}

impl<F> FnGenerator<F>
where
    F: Fn(&str) -> GeneratorResult<String> + Send + Sync,
{
    /// Wrap `func` under the given name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Generator for FnGenerator<F>
where
    F: Fn(&str) -> GeneratorResult<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, prompt: &str) -> GeneratorResult<String> {
        (self.func)(prompt)
    }
}
