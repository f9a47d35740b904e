//! Engine error types

use thiserror::Error;

/// Errors surfaced at the document boundary
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No default template registered for document type '{tag}'")]
    MissingTemplate { tag: String },

    #[error("Document has {} unresolved variable(s): {}", .tokens.len(), .tokens.join(", "))]
    UnresolvedVariables { tokens: Vec<String> },

    #[error("Render failed: {message}")]
    RenderFailure { message: String },

    #[error("Print surface blocked: {reason}")]
    BlockedPrintSurface { reason: String },

    #[error("Print failed: {message}")]
    PrintFailed { message: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DocumentError {
    /// Wrap any failure raised while mapping or substituting
    pub fn render_failure(err: impl std::fmt::Display) -> Self {
        DocumentError::RenderFailure {
            message: err.to_string(),
        }
    }

    /// Check if this error must stop the user from continuing
    ///
    /// Unresolved variables are advisory: the caller decides whether a
    /// document with leftovers may go out.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, DocumentError::UnresolvedVariables { .. })
    }
}
