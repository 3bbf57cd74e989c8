//! Core Error Types
//!
//! The only failure the core crate knows about is a configuration error at
//! construction time. The main application crate wraps it and adds the
//! loading errors (NotFound, Io, Serialization).

use thiserror::Error;

/// Core error type for the Email Advising workspace.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Configuration errors (fatal, raised at construction time)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
