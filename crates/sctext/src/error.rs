//! Error types for SCText operations.
//!
//! This module provides the main error type [`ScsError`]. Serialization
//! itself degrades to fallbacks instead of failing on odd graph content, so
//! most variants come from the surroundings: reading and decoding input,
//! building the graph, loading configuration.

use std::{fmt, io};

use thiserror::Error;

use sctext_core::GraphError;

/// The main error type for SCText operations.
///
/// # Diagnostic Variants
///
/// The `Document` variant keeps the source text next to the decoding error,
/// whose span points into it. This allows rich error reporting.
#[derive(Debug, Error)]
pub enum ScsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid graph document: {}", .err.message())]
    Document { err: toml::de::Error, src: String },

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Formatting error: {0}")]
    Format(#[from] fmt::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScsError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Document {
            err,
            src: src.into(),
        }
    }
}
