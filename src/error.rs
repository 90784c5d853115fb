use std::io;

use thiserror::Error;

/// Library-wide error type for informegen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration at {path}: {reason}")]
    Configuration { path: String, reason: String },

    /// Submitted form data could not be parsed.
    #[error("Failed to parse form data: {0}")]
    FormParse(#[from] serde_json::Error),

    /// Document rendering failed.
    #[error(transparent)]
    Render(#[from] crate::renderer::RenderError),
}
