//! Integration Tests Module
//!
//! End-to-end tests for the advising pipeline: routing scenarios, pipeline
//! properties, generator fallback, and file-based runs through the CLI layer.

// Shared knowledge base and corpus fixtures
mod fixtures;

// Routing scenarios and pipeline properties
mod advisor_test;

// Generator-assisted composition and fallback
mod composer_test;

// JSON loading and CLI report tests
mod loader_test;
