//! Error types for rule normalization
//!
//! This module defines every failure the library can report: the semantic
//! rejection raised by the normalizer, plus the I/O, parse and render
//! failures of the rule-document codec.

use std::path::PathBuf;

use thiserror::Error;

use crate::document::OutputFormat;

/// Rule simplification error types.
#[derive(Debug, Error)]
pub enum SimplifyError {
    /// A rule names zero or more than one api group.
    ///
    /// Multi-group rules cannot be decomposed into (group, resource) keys,
    /// so the whole run is rejected.
    #[error("rule #{index} has {count} apiGroups entries; exactly one apiGroup per rule is supported")]
    ApiGroupCount {
        /// Zero-based position of the offending rule in the input.
        index: usize,
        /// Number of api groups the rule carried.
        count: usize,
    },

    /// The input document could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input document does not have the expected `rules:` shape.
    #[error("invalid rule document{}", display_path(.path))]
    Parse {
        /// Path of the document, if it came from a file.
        path: Option<PathBuf>,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The canonical document could not be rendered.
    #[error("failed to render rule document as {format}")]
    Render {
        /// Format that was being produced.
        format: OutputFormat,
        /// Underlying encoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for rule simplification operations.
pub type SimplifyResult<T> = Result<T, SimplifyError>;

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" {}", p.display()),
        None => String::new(),
    }
}

impl SimplifyError {
    /// Get a stable error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            SimplifyError::ApiGroupCount { .. } => "API_GROUP_COUNT",
            SimplifyError::Io { .. } => "IO_ERROR",
            SimplifyError::Parse { .. } => "PARSE_ERROR",
            SimplifyError::Render { .. } => "RENDER_ERROR",
        }
    }
}
