//! Storage Layer
//!
//! Loads the read-only inputs of the advisor from JSON files.

pub mod loader;

pub use loader::*;
